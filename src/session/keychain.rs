//! OS keychain session storage.
//!
//! Uses the `keyring` crate. Each session key becomes its own credential
//! under a fixed service name, so the token never touches disk in clear.

use keyring::Entry;

use super::{LocalStorage, StorageError};

/// Keychain service name shared by every session entry.
const SERVICE_NAME: &str = "com.ticketbox.client";

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keychain(err.to_string())
    }
}

#[derive(Debug, Default)]
pub struct KeychainStorage;

impl LocalStorage for KeychainStorage {
    /// Returns `None` if no entry exists (never logged in, or logged out).
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entry = Entry::new(SERVICE_NAME, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let entry = Entry::new(SERVICE_NAME, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let entry = Entry::new(SERVICE_NAME, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // already gone
            Err(e) => Err(StorageError::from(e)),
        }
    }
}
