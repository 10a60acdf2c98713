use axum::response::{IntoResponse, Response};
use http::StatusCode;
use relay_core::{GoogleAuthError, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription failures, each mapped to one HTTP status
#[derive(Debug, Error)]
pub enum SttError {
    /// Client sent an unusable request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Google credentials are absent or could not be turned into a token
    #[error(transparent)]
    Auth(#[from] GoogleAuthError),

    /// The provider could not be reached
    #[error("speech provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered with a non-success status
    #[error("speech provider rejected the request ({status}): {message}")]
    ProviderRejected { status: u16, message: String },

    /// The provider answered with a body we could not decode
    #[error("malformed speech provider response: {0}")]
    MalformedResponse(String),

    /// Writing, reading, or removing the transient audio file failed
    #[error("temporary audio file error: {0}")]
    TempFile(#[from] std::io::Error),
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::TempFile(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(e) => e.status_code(),
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderRejected { .. } | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Auth(e) => e.error_type(),
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::ProviderRejected { .. } => "provider_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::TempFile(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::TempFile(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        relay_core::error_response(&self)
    }
}
