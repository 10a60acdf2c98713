//! Shared building blocks for the relay feature crates

mod error;
pub mod google;
mod http_client;
mod payload;

pub use error::{ErrorDetails, ErrorResponse, HttpError, error_response};
pub use google::{GoogleAuthError, GoogleCredentials, ServiceAccount};
pub use http_client::http_client;
pub use payload::ExtractPayload;
