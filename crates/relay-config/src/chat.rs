use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default cap on a `/chat` request body (32 MiB)
pub const DEFAULT_CHAT_BODY_BYTES: usize = 32 << 20;

/// Chat completion configuration for Anthropic models on AWS Bedrock
///
/// Every field is optional at load time. A missing region or model id is
/// reported when the first `/chat` request needs it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// AWS region hosting the model
    #[serde(default)]
    pub region: Option<String>,
    /// Access key ID (optional, uses default credential chain if absent)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Bedrock model identifier (e.g. `anthropic.claude-3-5-sonnet-20240620-v1:0`)
    #[serde(default)]
    pub model_id: Option<String>,
    /// Output token budget sent with every request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Endpoint override for the Bedrock runtime API
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Largest accepted `/chat` request body in bytes
    ///
    /// Covers the full client history, not just the forwarded tail.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            region: None,
            access_key_id: None,
            secret_access_key: None,
            model_id: None,
            max_tokens: default_max_tokens(),
            endpoint_url: None,
            max_body_bytes: DEFAULT_CHAT_BODY_BYTES,
        }
    }
}

const fn default_max_tokens() -> u32 {
    4096
}

const fn default_max_body_bytes() -> usize {
    DEFAULT_CHAT_BODY_BYTES
}
