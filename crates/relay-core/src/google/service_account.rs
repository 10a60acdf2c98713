//! Access tokens minted from a service-account key (JWT bearer grant)

use std::{path::PathBuf, sync::Arc};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::GoogleAuthError;

/// Scope granting access to Speech-to-Text and Text-to-Speech
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Tokens closer than this to expiry are replaced before use
const REFRESH_MARGIN_SECS: u64 = 300;

/// Fields read from a service-account JSON key
#[derive(Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    client_email: String,
    private_key: SecretString,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

const fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug)]
struct CachedToken {
    value: SecretString,
    expires_at: u64,
}

impl CachedToken {
    const fn is_fresh(&self, now: u64) -> bool {
        now + REFRESH_MARGIN_SECS < self.expires_at
    }
}

/// Service account whose key file is exchanged for OAuth access tokens
///
/// The key file is read on each exchange, so a rotated key is picked up on
/// the next refresh. Clones share one token cache.
#[derive(Debug, Clone)]
pub struct ServiceAccount {
    key_file: PathBuf,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccount {
    #[must_use]
    pub fn new(key_file: impl Into<PathBuf>, client: Client) -> Self {
        Self {
            key_file: key_file.into(),
            client,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Current access token, minting a new one when the cached token is stale
    ///
    /// # Errors
    ///
    /// Returns an error if the key file is unusable or the token exchange fails
    pub async fn access_token(&self) -> Result<SecretString, GoogleAuthError> {
        let now = jsonwebtoken::get_current_timestamp();

        if let Some(token) = self.cached.read().await.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let mut cached = self.cached.write().await;

        // Another request may have refreshed while this one waited for the lock
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    async fn exchange(&self) -> Result<CachedToken, GoogleAuthError> {
        let key = self.read_key().await?;
        let token_uri = key.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
        let issued_at = jsonwebtoken::get_current_timestamp();
        let assertion = sign_assertion(&key, token_uri, issued_at)?;

        tracing::debug!(account = %key.client_email, "exchanging service-account assertion for an access token");

        let response = self
            .client
            .post(token_uri)
            .form(&TokenRequest {
                grant_type: JWT_BEARER_GRANT,
                assertion: &assertion,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google token request failed: {e}");
                GoogleAuthError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());

            tracing::error!("Google token endpoint error ({status}): {message}");

            return Err(GoogleAuthError::Rejected { status, message });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GoogleAuthError::MalformedResponse(e.to_string()))?;

        Ok(CachedToken {
            value: SecretString::from(token.access_token),
            expires_at: issued_at + token.expires_in,
        })
    }

    async fn read_key(&self) -> Result<ServiceAccountKey, GoogleAuthError> {
        let path = self.key_file.display();

        let raw = tokio::fs::read_to_string(&self.key_file)
            .await
            .map_err(|e| GoogleAuthError::InvalidCredentials(format!("cannot read {path}: {e}")))?;

        let key: ServiceAccountKey = serde_json::from_str(&raw)
            .map_err(|e| GoogleAuthError::InvalidCredentials(format!("{path} is not a service-account key: {e}")))?;

        if let Some(other) = key.kind.as_deref().filter(|kind| *kind != "service_account") {
            return Err(GoogleAuthError::InvalidCredentials(format!(
                "{path} holds `{other}` credentials, expected `service_account`"
            )));
        }

        Ok(key)
    }
}

fn sign_assertion(key: &ServiceAccountKey, audience: &str, issued_at: u64) -> Result<String, GoogleAuthError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&key.private_key_id);

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
        .map_err(|e| GoogleAuthError::InvalidCredentials(format!("private_key is not an RSA PEM key: {e}")))?;

    let claims = Claims {
        iss: &key.client_email,
        scope: CLOUD_PLATFORM_SCOPE,
        aud: audience,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    jsonwebtoken::encode(&header, &claims, &signing_key)
        .map_err(|e| GoogleAuthError::InvalidCredentials(format!("failed to sign token request: {e}")))
}
