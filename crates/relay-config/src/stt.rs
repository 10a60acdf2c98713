use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

/// Speech-to-text configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Base URL override for the Speech-to-Text API
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Directory for transient audio files (system temp dir if absent)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            temp_dir: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

const fn default_max_upload_bytes() -> usize {
    32 << 20
}
