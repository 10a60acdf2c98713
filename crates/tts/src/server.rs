use std::sync::Arc;

use relay_core::{GoogleCredentials, ServiceAccount};

use crate::{
    provider::{SpeechSynthesizer, google::GoogleTextToSpeechProvider},
    types::{SpeechResponse, SynthesisRequest, VoiceSettings},
};

/// Synthesis service backing `/synthesize`
pub struct Server {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voice: VoiceSettings,
}

impl Server {
    /// Create a server around an already constructed synthesizer
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            voice: VoiceSettings::japanese_neutral_mp3(),
        }
    }

    /// Synthesize the request text with the fixed voice
    pub async fn synthesize(&self, request: SynthesisRequest) -> crate::error::Result<SpeechResponse> {
        let text = request.into_text()?;

        tracing::debug!(provider = self.synthesizer.name(), "synthesizing speech");

        let audio = self.synthesizer.synthesize(&text, &self.voice).await?;

        Ok(SpeechResponse {
            audio,
            content_type: self.voice.encoding.mime_type(),
        })
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a relay_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a relay_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Server> {
        let client = relay_core::http_client()?;
        let mut credentials = GoogleCredentials::new(
            self.config.google.api_key.clone(),
            self.config.google.access_token.clone(),
        );

        if let Some(key_file) = self.config.google.credentials_file() {
            tracing::debug!(key_file = %key_file.display(), "using Google service-account credentials");
            credentials = credentials.with_service_account(ServiceAccount::new(key_file, client.clone()));
        }

        if !credentials.is_configured() {
            tracing::warn!("no Google credentials configured, /synthesize will fail until they are set");
        }

        let synthesizer = GoogleTextToSpeechProvider::new(
            client,
            credentials,
            self.config.tts.base_url.as_ref().map(url::Url::as_str),
        );

        tracing::debug!("TTS server initialized with provider: {}", synthesizer.name());

        Ok(Server::new(Arc::new(synthesizer)))
    }
}
