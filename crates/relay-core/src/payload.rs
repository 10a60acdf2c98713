use axum::{
    body::{Body, Bytes},
    extract::FromRequest,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Extractor for JSON request bodies
///
/// Unlike `axum::Json`, rejections carry a plain-text reason. The body limit
/// is whatever `DefaultBodyLimit` the route sets, and an oversized body is
/// reported as `413`.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(request.headers()) {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            )
                .into_response());
        }

        let bytes = Bytes::from_request(request, state).await.map_err(|rejection| {
            let status = rejection.status();
            let reason = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "Request body is too large".to_owned()
            } else {
                format!("Failed to read request body: {}", rejection.body_text())
            };
            (status, reason).into_response()
        })?;

        serde_json::from_slice::<T>(&bytes).map(Self).map_err(|e| {
            (StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")).into_response()
        })
    }
}

/// `application/json`, optionally followed by parameters such as `charset`
fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
