use axum::response::{IntoResponse, Response};
use http::StatusCode;
use relay_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat completion failures
#[derive(Debug, Error)]
pub enum ChatError {
    /// A setting needed to reach the model is absent
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// The model endpoint could not be reached
    #[error("chat provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The model endpoint answered with an error
    #[error("chat provider rejected the request ({status}): {message}")]
    ProviderRejected { status: u16, message: String },

    /// The model answered with a body we could not use
    #[error("malformed chat response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingConfig(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderRejected { .. } | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingConfig(_) => "configuration_error",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::ProviderRejected { .. } => "provider_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Internal details stay in the logs
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            tracing::error!("internal chat error: {e:#}");
        }
        relay_core::error_response(&self)
    }
}
