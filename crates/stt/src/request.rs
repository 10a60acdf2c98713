use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    response::{IntoResponse, Response},
};
use http::StatusCode;

use crate::{error::SttError, types::TranscriptionRequest};

/// Extractor for the multipart form carrying the recorded audio
///
/// Only the `file` part is read; any other parts are skipped.
pub struct ExtractMultipart(pub TranscriptionRequest);

impl<S> FromRequest<S> for ExtractMultipart
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(request.headers()) {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'",
            )
                .into_response());
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let mut audio: Option<Vec<u8>> = None;
        let mut filename = String::from("audio.webm");
        let mut content_type = String::from("audio/webm");

        loop {
            let field = multipart
                .next_field()
                .await
                .map_err(|e| (e.status(), format!("Failed to parse multipart form: {}", e.body_text())).into_response())?;

            let Some(field) = field else {
                break;
            };

            if field.name() != Some("file") {
                continue;
            }

            if let Some(name) = field.file_name() {
                filename = name.to_string();
            }
            if let Some(ct) = field.content_type() {
                content_type = ct.to_string();
            }

            let bytes = field
                .bytes()
                .await
                .map_err(|e| (e.status(), format!("Failed to read audio data: {}", e.body_text())).into_response())?;

            audio = Some(bytes.to_vec());
        }

        let audio = audio.ok_or_else(|| {
            SttError::InvalidRequest("missing required `file` part in multipart form".to_owned()).into_response()
        })?;

        Ok(Self(TranscriptionRequest {
            audio,
            filename,
            content_type,
        }))
    }
}

/// `multipart/form-data` in any letter case, with its parameters
fn is_multipart(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("multipart/form-data"))
}
