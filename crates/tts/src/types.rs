use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::error::TtsError;

/// Body of `/synthesize`
///
/// Fields other than `text` are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl SynthesisRequest {
    /// The text to speak
    ///
    /// Absent and blank text are both rejected before any provider call.
    pub fn into_text(self) -> crate::error::Result<String> {
        match self.text {
            None => Err(TtsError::MissingField("text")),
            Some(text) if text.trim().is_empty() => {
                Err(TtsError::InvalidRequest("`text` must not be empty".to_owned()))
            }
            Some(text) => Ok(text),
        }
    }
}

/// Voice gender hint understood by the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlVoiceGender {
    Neutral,
}

/// Output container/codec of the synthesized audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputEncoding {
    Mp3,
}

impl OutputEncoding {
    /// MIME type of audio in this encoding
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// Fixed voice selection and output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    pub language_code: String,
    pub gender: SsmlVoiceGender,
    pub encoding: OutputEncoding,
}

impl VoiceSettings {
    /// Neutral Japanese voice rendered as MP3
    pub fn japanese_neutral_mp3() -> Self {
        Self {
            language_code: "ja-JP".to_owned(),
            gender: SsmlVoiceGender::Neutral,
            encoding: OutputEncoding::Mp3,
        }
    }
}

/// Raw audio returned by a synthesizer
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: &'static str,
}

impl SpeechResponse {
    /// Convert into a streamed HTTP response
    ///
    /// The whole payload is already in memory, so the stream yields it as a
    /// single chunk.
    pub fn into_response(self) -> axum::response::Response {
        let chunk = Bytes::from(self.audio);
        let stream = futures_util::stream::once(async move { Ok::<_, Infallible>(chunk) });

        (
            [(http::header::CONTENT_TYPE, self.content_type)],
            Body::from_stream(stream),
        )
            .into_response()
    }
}
