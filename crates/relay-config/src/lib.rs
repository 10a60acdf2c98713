#![allow(clippy::must_use_candidate)]

pub mod chat;
pub mod cors;
mod env;
pub mod google;
pub mod health;
mod loader;
pub mod server;
pub mod stt;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use chat::*;
pub use cors::*;
pub use google::*;
pub use health::*;
pub use server::*;
pub use stt::*;
pub use telemetry::*;
pub use tts::*;

/// Top-level relay configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Cloud credentials shared by STT and TTS
    #[serde(default)]
    pub google: GoogleConfig,
    /// Speech-to-text configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Chat completion configuration
    #[serde(default)]
    pub chat: ChatConfig,
    /// Text-to-speech configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Treat an empty string as an absent value
///
/// Config files commonly expand unset variables to `""` via
/// `{{ env.VAR | default("") }}`, so both spellings mean "not configured".
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
