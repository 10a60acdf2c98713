//! Authentication and error decoding for Google Cloud REST APIs

mod service_account;

use http::StatusCode;
use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

pub use service_account::{CLOUD_PLATFORM_SCOPE, ServiceAccount};

use crate::HttpError;

/// Header carrying a Google Cloud API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Failures while attaching Google credentials to a request
#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("missing configuration: google.api_key, google.access_token or google.credentials_file")]
    NotConfigured,

    /// The service-account key file is unreadable or unusable
    #[error("invalid Google service-account credentials: {0}")]
    InvalidCredentials(String),

    #[error("Google token endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("Google token endpoint rejected the service account ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed Google token response: {0}")]
    MalformedResponse(String),
}

impl HttpError for GoogleAuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured | Self::InvalidCredentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Rejected { .. } | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::NotConfigured | Self::InvalidCredentials(_) => "configuration_error",
            Self::Unavailable(_) => "provider_unavailable",
            Self::Rejected { .. } => "provider_error",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Credentials for a Google Cloud REST call
#[derive(Debug, Clone, Default)]
pub struct GoogleCredentials {
    api_key: Option<SecretString>,
    access_token: Option<SecretString>,
    service_account: Option<ServiceAccount>,
}

impl GoogleCredentials {
    /// Keep whichever of the two values is present and non-blank
    pub fn new(api_key: Option<SecretString>, access_token: Option<SecretString>) -> Self {
        let present = |secret: &SecretString| !secret.expose_secret().trim().is_empty();

        Self {
            api_key: api_key.filter(present),
            access_token: access_token.filter(present),
            service_account: None,
        }
    }

    /// Fall back to tokens minted for a service account
    #[must_use]
    pub fn with_service_account(mut self, account: ServiceAccount) -> Self {
        self.service_account = Some(account);
        self
    }

    /// Whether at least one credential is available
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.access_token.is_some() || self.service_account.is_some()
    }

    /// Attach credentials to an outgoing request
    ///
    /// An API key takes precedence over a static access token, which takes
    /// precedence over the service account.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is configured or a service-account token
    /// cannot be obtained
    pub async fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, GoogleAuthError> {
        if let Some(api_key) = &self.api_key {
            return Ok(builder.header(API_KEY_HEADER, api_key.expose_secret()));
        }

        if let Some(token) = &self.access_token {
            return Ok(builder.bearer_auth(token.expose_secret()));
        }

        let account = self.service_account.as_ref().ok_or(GoogleAuthError::NotConfigured)?;
        let token = account.access_token().await?;

        Ok(builder.bearer_auth(token.expose_secret()))
    }
}

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Read the status and a human-readable message from a failed response
///
/// Google APIs wrap failures as `{"error": {"code", "message", "status"}}`;
/// anything else is returned verbatim.
pub async fn google_error(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    let message = match serde_json::from_str::<GoogleErrorEnvelope>(&text) {
        Ok(GoogleErrorEnvelope {
            error: GoogleErrorBody {
                message,
                status: Some(code),
            },
        }) => format!("{code}: {message}"),
        Ok(envelope) => envelope.error.message,
        Err(_) => text,
    };

    (status, message)
}
