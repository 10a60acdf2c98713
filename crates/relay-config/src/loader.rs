use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::{ChatConfig, Config, GoogleConfig};

/// Environment variables read when no config file is present
pub mod vars {
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
    pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
    pub const CLAUDE_MODEL_ID: &str = "CLAUDE_MODEL_ID";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";
    pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
    pub const RELAY_ALLOWED_ORIGIN: &str = "RELAY_ALLOWED_ORIGIN";
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        if config.google.credentials_file().is_none() {
            config.google.credentials_file = env_path(vars::GOOGLE_APPLICATION_CREDENTIALS);
        }

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from the process environment alone
    ///
    /// Provider settings are taken as-is and none are required. A handler
    /// reports whatever it needs and does not find.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.trim().is_empty());

        let mut config = Self {
            google: GoogleConfig {
                api_key: var(vars::GOOGLE_API_KEY).map(SecretString::from),
                access_token: var(vars::GOOGLE_ACCESS_TOKEN).map(SecretString::from),
                credentials_file: env_path(vars::GOOGLE_APPLICATION_CREDENTIALS),
            },
            chat: ChatConfig {
                region: var(vars::AWS_REGION),
                access_key_id: var(vars::AWS_ACCESS_KEY_ID).map(SecretString::from),
                secret_access_key: var(vars::AWS_SECRET_ACCESS_KEY).map(SecretString::from),
                model_id: var(vars::CLAUDE_MODEL_ID),
                ..ChatConfig::default()
            },
            ..Self::default()
        };

        if let Some(origin) = var(vars::RELAY_ALLOWED_ORIGIN) {
            config.server.cors.allowed_origin = origin;
        }

        config
    }

    /// Load `path` when it exists, otherwise fall back to [`Config::from_env`]
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded, or if the
    /// environment holds a value that can never work
    pub fn load_or_env(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::from_env();
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Only the shape of configured values is checked. Absent provider
    /// credentials are not an error at this stage.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured value can never work
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_cors()?;

        if self.chat.max_tokens == 0 {
            anyhow::bail!("chat.max_tokens must be greater than 0");
        }

        if self.chat.max_body_bytes == 0 {
            anyhow::bail!("chat.max_body_bytes must be greater than 0");
        }

        if self.stt.max_upload_bytes == 0 {
            anyhow::bail!("stt.max_upload_bytes must be greater than 0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_cors(&self) -> anyhow::Result<()> {
        let cors = &self.server.cors;

        if !cors.enabled {
            return Ok(());
        }

        if cors.allowed_origin == "*" {
            anyhow::bail!("server.cors.allowed_origin must name a single origin, not '*'");
        }

        http::HeaderValue::from_str(&cors.allowed_origin)
            .map_err(|e| anyhow::anyhow!("invalid server.cors.allowed_origin: {e}"))?;

        Ok(())
    }
}

/// Path named by an environment variable, unless unset or blank
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}
