use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

/// Google Cloud credentials used by the speech and text-to-speech providers
///
/// Any one of the three is enough. An API key is sent as `x-goog-api-key` and
/// an access token as a bearer token. A service-account key file is exchanged
/// for short-lived bearer tokens. Precedence follows field order.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// API key restricted to the Speech-to-Text and Text-to-Speech APIs
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// OAuth 2.0 access token (e.g. from `gcloud auth print-access-token`)
    #[serde(default)]
    pub access_token: Option<SecretString>,
    /// Service-account JSON key file
    ///
    /// Defaults to `GOOGLE_APPLICATION_CREDENTIALS` when unset.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl GoogleConfig {
    /// Configured key file, ignoring an empty path
    pub fn credentials_file(&self) -> Option<&std::path::Path> {
        self.credentials_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}
