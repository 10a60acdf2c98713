use std::time::Duration;

use serde::Deserialize;

/// Origin of the browser front end in a local development setup
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Cross-origin policy
///
/// Browser access is granted to exactly one origin. Every method and header
/// is permitted from that origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Apply the CORS layer at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// The single origin allowed to call the relay from a browser
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Allow cookies and other credentials on cross-origin requests
    #[serde(default = "default_enabled")]
    pub credentials: bool,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origin: default_allowed_origin(),
            credentials: true,
            max_age: None,
        }
    }
}

impl CorsConfig {
    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_allowed_origin() -> String {
    DEFAULT_ALLOWED_ORIGIN.to_string()
}
