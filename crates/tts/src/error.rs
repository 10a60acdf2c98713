use axum::response::{IntoResponse, Response};
use http::StatusCode;
use relay_core::{GoogleAuthError, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis failures
#[derive(Debug, Error)]
pub enum TtsError {
    /// A required request field is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but unusable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Google credentials are absent or could not be turned into a token
    #[error(transparent)]
    Auth(#[from] GoogleAuthError),

    /// The provider could not be reached
    #[error("speech synthesis provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered with a non-success status
    #[error("speech synthesis provider rejected the request ({status}): {message}")]
    ProviderRejected { status: u16, message: String },

    /// The provider answered with a body we could not decode
    #[error("malformed speech synthesis response: {0}")]
    MalformedResponse(String),
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(e) => e.status_code(),
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderRejected { .. } | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingField(_) | Self::InvalidRequest(_) => "invalid_request_error",
            Self::Auth(e) => e.error_type(),
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::ProviderRejected { .. } => "provider_error",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        relay_core::error_response(&self)
    }
}
