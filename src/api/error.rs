use thiserror::Error;

use crate::session::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend (or mock) answered `success: false`.
    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
