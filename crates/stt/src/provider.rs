pub(crate) mod google;

use async_trait::async_trait;

use crate::types::{RecognitionConfig, RecognitionResult};

/// A speech-recognition backend
///
/// The relay owns no recognition logic; implementations forward the audio
/// to a managed service and return its results unchanged.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in `audio` using the given parameters
    async fn recognize(
        &self,
        audio: Vec<u8>,
        config: &RecognitionConfig,
    ) -> crate::error::Result<Vec<RecognitionResult>>;

    /// Get the provider name
    fn name(&self) -> &str;
}
