use async_trait::async_trait;
use base64::Engine;
use relay_core::{GoogleCredentials, google::google_error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::TtsError,
    types::{OutputEncoding, SsmlVoiceGender, VoiceSettings},
};

use super::SpeechSynthesizer;

const DEFAULT_TEXT_TO_SPEECH_API_URL: &str = "https://texttospeech.googleapis.com";

/// Google Cloud Text-to-Speech v1 provider
pub(crate) struct GoogleTextToSpeechProvider {
    client: Client,
    base_url: String,
    credentials: GoogleCredentials,
}

impl GoogleTextToSpeechProvider {
    pub fn new(client: Client, credentials: GoogleCredentials, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .unwrap_or(DEFAULT_TEXT_TO_SPEECH_API_URL)
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
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: SsmlVoiceGender,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: OutputEncoding,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

impl<'a> SynthesizeRequest<'a> {
    fn new(text: &'a str, voice: &'a VoiceSettings) -> Self {
        Self {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &voice.language_code,
                ssml_gender: voice.gender,
            },
            audio_config: AudioConfig {
                audio_encoding: voice.encoding,
            },
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTextToSpeechProvider {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> crate::error::Result<Vec<u8>> {
        let url = format!("{}/v1/text:synthesize", self.base_url);

        tracing::debug!(
            chars = text.chars().count(),
            language = %voice.language_code,
            "Google speech synthesis request"
        );

        let request = self
            .credentials
            .authorize(self.client.post(&url))
            .await?;

        let response = request
            .json(&SynthesizeRequest::new(text, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google text-to-speech request failed: {e}");
                TtsError::ProviderUnavailable(format!("failed to send request to Google Text-to-Speech: {e}"))
            })?;

        if !response.status().is_success() {
            let (status, message) = google_error(response).await;

            tracing::error!("Google text-to-speech API error ({status}): {message}");

            return Err(TtsError::ProviderRejected { status, message });
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google text-to-speech response: {e}");
            TtsError::MalformedResponse(e.to_string())
        })?;

        let encoded = result
            .audio_content
            .ok_or_else(|| TtsError::MalformedResponse("response carried no audioContent".to_owned()))?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| TtsError::MalformedResponse(format!("audioContent is not valid base64: {e}")))?;

        tracing::debug!(bytes = audio.len(), "Google speech synthesis complete");

        Ok(audio)
    }

    fn name(&self) -> &str {
        "google"
    }
}
