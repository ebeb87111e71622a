//! Client-side session state.
//!
//! The whole session is two string keys, `token` and `userId`, held in a
//! local key-value store with the same contract as browser local storage.
//! There is no expiry, refresh, or invalidation: a stored token is sent
//! as-is until `clear()` removes it.

pub mod file;
#[cfg(all(feature = "keychain", any(target_os = "macos", target_os = "windows")))]
pub mod keychain;
pub mod memory;

use thiserror::Error;

pub use file::FileStorage;
#[cfg(all(feature = "keychain", any(target_os = "macos", target_os = "windows")))]
pub use keychain::KeychainStorage;
pub use memory::MemoryStorage;

/// Storage key holding the raw `Authorization` header value.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the logged-in user identifier.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not a JSON object of strings: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Keychain operation failed: {0}")]
    Keychain(String),
}

/// Local key-value store, modelled on `window.localStorage`.
///
/// Implementations use interior mutability so a single store can be shared
/// between the API client (which reads the token) and the commands that
/// write it after login.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a key that is not present is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to the two session keys.
pub struct Session {
    storage: Box<dyn LocalStorage>,
}

impl Session {
    pub fn new(storage: Box<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// The stored token, or the empty string when nobody is logged in.
    pub fn token(&self) -> Result<String, StorageError> {
        Ok(self.storage.get_item(TOKEN_KEY)?.unwrap_or_default())
    }

    /// The stored user identifier. An empty value counts as absent.
    pub fn user_id(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get_item(USER_ID_KEY)?
            .filter(|id| !id.is_empty()))
    }

    /// Persist both session fields after a successful login or register.
    pub fn store(&self, token: &str, user_id: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(USER_ID_KEY, user_id)?;
        Ok(())
    }

    /// Remove both session fields.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_ID_KEY)?;
        Ok(())
    }
}
