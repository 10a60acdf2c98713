use async_trait::async_trait;
use base64::Engine;
use relay_core::{GoogleCredentials, google::google_error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::SttError,
    types::{RecognitionConfig, RecognitionResult},
};

use super::SpeechRecognizer;

const DEFAULT_SPEECH_API_URL: &str = "https://speech.googleapis.com";

/// Google Cloud Speech-to-Text v1 provider
pub(crate) struct GoogleSpeechProvider {
    client: Client,
    base_url: String,
    credentials: GoogleCredentials,
}

impl GoogleSpeechProvider {
    pub fn new(client: Client, credentials: GoogleCredentials, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .unwrap_or(DEFAULT_SPEECH_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            credentials,
        }
    }
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: &'a RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechProvider {
    async fn recognize(
        &self,
        audio: Vec<u8>,
        config: &RecognitionConfig,
    ) -> crate::error::Result<Vec<RecognitionResult>> {
        let url = format!("{}/v1/speech:recognize", self.base_url);

        tracing::debug!(
            bytes = audio.len(),
            language = %config.language_code,
            "Google speech recognition request"
        );

        let body = RecognizeRequest {
            config,
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(&audio),
            },
        };

        let request = self
            .credentials
            .authorize(self.client.post(&url))
            .await?;

        let response = request.json(&body).send().await.map_err(|e| {
            tracing::error!("Google speech request failed: {e}");
            SttError::ProviderUnavailable(format!("failed to send request to Google Speech-to-Text: {e}"))
        })?;

        if !response.status().is_success() {
            let (status, message) = google_error(response).await;

            tracing::error!("Google speech API error ({status}): {message}");

            return Err(SttError::ProviderRejected { status, message });
        }

        let result: RecognizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google speech response: {e}");
            SttError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!(results = result.results.len(), "Google speech recognition complete");

        Ok(result.results)
    }

    fn name(&self) -> &str {
        "google"
    }
}
