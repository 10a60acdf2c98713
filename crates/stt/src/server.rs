use std::{path::PathBuf, sync::Arc};

use relay_core::{GoogleCredentials, ServiceAccount};

use crate::{
    audio_file::ScopedAudioFile,
    provider::{SpeechRecognizer, google::GoogleSpeechProvider},
    types::{RecognitionConfig, TranscriptionRequest, TranscriptionResponse, first_transcript},
};

/// Transcription service backing `/transcribe`
pub struct Server {
    recognizer: Arc<dyn SpeechRecognizer>,
    recognition: RecognitionConfig,
    temp_dir: Option<PathBuf>,
    upload_limit: usize,
}

impl Server {
    /// Create a server around an already constructed recognizer
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, temp_dir: Option<PathBuf>, upload_limit: usize) -> Self {
        Self {
            recognizer,
            recognition: RecognitionConfig::japanese_webm_opus(),
            temp_dir,
            upload_limit,
        }
    }

    /// Maximum accepted upload size in bytes
    pub const fn upload_limit(&self) -> usize {
        self.upload_limit
    }

    /// Transcribe one uploaded recording
    ///
    /// The upload is parked in a temporary file for exactly as long as the
    /// provider call takes. The file is removed whether the call succeeds
    /// or fails.
    pub async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
        tracing::debug!(
            bytes = request.audio.len(),
            filename = %request.filename,
            content_type = %request.content_type,
            provider = self.recognizer.name(),
            "transcribing upload"
        );

        let audio_file = ScopedAudioFile::create(self.temp_dir.as_deref(), request.audio).await?;

        let outcome = match audio_file.read().await {
            Ok(audio) => self.recognizer.recognize(audio, &self.recognition).await,
            Err(e) => Err(e.into()),
        };

        audio_file.remove().await;

        let results = outcome?;

        if results.is_empty() {
            tracing::debug!("provider returned no recognition results");
        }

        Ok(TranscriptionResponse {
            transcription: first_transcript(&results),
        })
    }
}

/// Builder for constructing the STT server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a relay_config::Config,
}

impl<'a> SttServerBuilder<'a> {
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
            tracing::warn!("no Google credentials configured, /transcribe will fail until they are set");
        }

        let recognizer = GoogleSpeechProvider::new(client, credentials, self.config.stt.base_url.as_ref().map(url::Url::as_str));

        tracing::debug!("STT server initialized with provider: {}", recognizer.name());

        Ok(Server::new(
            Arc::new(recognizer),
            self.config.stt.temp_dir.clone(),
            self.config.stt.max_upload_bytes,
        ))
    }
}
