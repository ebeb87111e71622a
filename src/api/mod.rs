//! API client module for the ticketing storefront.
//!
//! Provides the HTTP client with token header injection, the canned mock
//! backend, Lambda-proxy envelope unwrapping, and request/response types
//! matching the backend API.

pub mod client;
pub mod envelope;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{ApiClient, ApiMode};
pub use envelope::EnvelopeMode;
pub use error::ApiError;
