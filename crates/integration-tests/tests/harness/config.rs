//! Programmatic configuration builder for integration tests

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use relay_config::{Config, CorsConfig, ServerConfig};
use secrecy::SecretString;

pub const TEST_MODEL_ID: &str = "anthropic.claude-test-v1:0";

const SERVICE_ACCOUNT_PEM: &str = include_str!("../../../relay-core/testdata/service_account_key.pem");

/// Write a service-account key whose token endpoint is `token_uri`
pub fn write_service_account_key(dir: &Path, token_uri: &str) -> PathBuf {
    let key = serde_json::json!({
        "type": "service_account",
        "project_id": "voice-relay-test",
        "private_key_id": "test-key",
        "private_key": SERVICE_ACCOUNT_PEM,
        "client_email": "relay@voice-relay-test.iam.gserviceaccount.com",
        "token_uri": token_uri,
    });

    let path = dir.join("service-account.json");
    std::fs::write(&path, key.to_string()).expect("write service-account key");
    path
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with no providers configured
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point both Google speech APIs at a mock backend with an API key
    pub fn with_google(mut self, base_url: &str) -> Self {
        let url: url::Url = base_url.parse().expect("valid URL");
        self.config.google.api_key = Some(SecretString::from("test-google-key"));
        self.config.stt.base_url = Some(url.clone());
        self.config.tts.base_url = Some(url);
        self
    }

    /// Point both Google speech APIs at a mock backend with a service account
    pub fn with_google_service_account(mut self, base_url: &str, key_file: &Path) -> Self {
        let url: url::Url = base_url.parse().expect("valid URL");
        self.config.google.credentials_file = Some(key_file.to_path_buf());
        self.config.stt.base_url = Some(url.clone());
        self.config.tts.base_url = Some(url);
        self
    }

    /// Point the chat model at a mock Bedrock runtime with static credentials
    pub fn with_bedrock(mut self, endpoint_url: &str) -> Self {
        let chat = &mut self.config.chat;
        chat.region = Some("ap-northeast-1".to_owned());
        chat.access_key_id = Some(SecretString::from("AKIDTEST"));
        chat.secret_access_key = Some(SecretString::from("test-secret"));
        chat.model_id = Some(TEST_MODEL_ID.to_owned());
        chat.endpoint_url = Some(endpoint_url.parse().expect("valid URL"));
        self
    }

    /// Park uploads in `dir` so tests can watch it
    pub fn with_temp_dir(mut self, dir: &Path) -> Self {
        self.config.stt.temp_dir = Some(dir.to_path_buf());
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
