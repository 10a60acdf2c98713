pub(crate) mod google;

use async_trait::async_trait;

use crate::types::VoiceSettings;

/// A text-to-speech backend
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` as audio in the requested voice and encoding
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> crate::error::Result<Vec<u8>>;

    /// Get the provider name
    fn name(&self) -> &str;
}
