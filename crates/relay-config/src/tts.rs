use serde::Deserialize;
use url::Url;

/// Text-to-speech configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Base URL override for the Text-to-Speech API
    #[serde(default)]
    pub base_url: Option<Url>,
}
