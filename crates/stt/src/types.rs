use serde::{Deserialize, Serialize};

/// Audio uploaded to `/transcribe`
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Original filename
    pub filename: String,
    /// Content type of the audio file
    pub content_type: String,
}

/// Response body of `/transcribe`
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// First alternative of the first result, empty when nothing was recognized
    pub transcription: String,
}

/// Audio encodings understood by the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// Opus frames in a WebM container, as recorded by browsers
    WebmOpus,
}

/// Fixed recognition parameters sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub language_code: String,
}

impl RecognitionConfig {
    /// Browser-recorded Japanese speech: WebM/Opus at 48 kHz
    pub fn japanese_webm_opus() -> Self {
        Self {
            encoding: AudioEncoding::WebmOpus,
            sample_rate_hertz: 48_000,
            language_code: "ja-JP".to_owned(),
        }
    }
}

/// One recognized segment with its ranked hypotheses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
}

/// A single transcript hypothesis
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// The transcript the relay reports for a set of results
///
/// Only the top hypothesis of the first segment is used; no results at all
/// means silence, which is reported as an empty string.
pub fn first_transcript(results: &[RecognitionResult]) -> String {
    results
        .first()
        .and_then(|result| result.alternatives.first())
        .map(|alternative| alternative.transcript.clone())
        .unwrap_or_default()
}
