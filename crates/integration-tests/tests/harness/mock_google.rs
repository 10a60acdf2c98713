//! Mock Google Cloud speech backend for integration tests
//!
//! Serves `speech:recognize` and `text:synthesize` with canned answers and
//! records every request body it receives. A `/token` route stands in for
//! the OAuth token endpoint used by service-account credentials.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json, Router, routing};
use base64::Engine;
use tokio_util::sync::CancellationToken;

/// Bytes returned as synthesized audio (an MP3 frame header)
pub const FAKE_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x0F];

/// Access token handed out by the mock token endpoint
pub const MINTED_TOKEN: &str = "ya29.mock-service-account";

/// Mock Google backend that returns predictable responses
pub struct MockGoogle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGoogleState>,
}

struct MockGoogleState {
    /// Transcript to return, `None` for silence
    transcript: Option<String>,
    /// Status to fail every request with
    fail_with: Option<StatusCode>,
    recognize_requests: Mutex<Vec<serde_json::Value>>,
    synthesize_requests: Mutex<Vec<serde_json::Value>>,
    api_keys: Mutex<Vec<String>>,
    bearer_tokens: Mutex<Vec<String>>,
    token_grants: Mutex<Vec<String>>,
}

impl MockGoogle {
    /// Start a mock that recognizes every upload as `transcript`
    pub async fn start(transcript: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some(transcript.to_owned()), None).await
    }

    /// Start a mock that hears nothing in any upload
    pub async fn start_silent() -> anyhow::Result<Self> {
        Self::start_inner(None, None).await
    }

    /// Start a mock that rejects every request with `status`
    pub async fn start_failing(status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(None, Some(status)).await
    }

    async fn start_inner(transcript: Option<String>, fail_with: Option<StatusCode>) -> anyhow::Result<Self> {
        let state = Arc::new(MockGoogleState {
            transcript,
            fail_with,
            recognize_requests: Mutex::new(Vec::new()),
            synthesize_requests: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
            bearer_tokens: Mutex::new(Vec::new()),
            token_grants: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/speech:recognize", routing::post(handle_recognize))
            .route("/v1/text:synthesize", routing::post(handle_synthesize))
            .route("/token", routing::post(handle_token))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the Google endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bodies of all recognition requests received
    pub fn recognize_requests(&self) -> Vec<serde_json::Value> {
        self.state.recognize_requests.lock().unwrap().clone()
    }

    /// Bodies of all synthesis requests received
    pub fn synthesize_requests(&self) -> Vec<serde_json::Value> {
        self.state.synthesize_requests.lock().unwrap().clone()
    }

    /// `x-goog-api-key` values seen, in arrival order
    pub fn api_keys(&self) -> Vec<String> {
        self.state.api_keys.lock().unwrap().clone()
    }

    /// Bearer tokens seen on speech requests, in arrival order
    pub fn bearer_tokens(&self) -> Vec<String> {
        self.state.bearer_tokens.lock().unwrap().clone()
    }

    /// `grant_type` of every token exchange received
    pub fn token_grants(&self) -> Vec<String> {
        self.state.token_grants.lock().unwrap().clone()
    }
}

impl Drop for MockGoogle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record_key(state: &MockGoogleState, headers: &HeaderMap) {
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        state.api_keys.lock().unwrap().push(key.to_owned());
    }

    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.bearer_tokens.lock().unwrap().push(token.to_owned());
    }
}

async fn handle_token(
    State(state): State<Arc<MockGoogleState>>,
    Form(grant): Form<std::collections::HashMap<String, String>>,
) -> Response {
    let grant_type = grant.get("grant_type").cloned().unwrap_or_default();
    let has_assertion = grant.get("assertion").is_some_and(|a| a.split('.').count() == 3);
    state.token_grants.lock().unwrap().push(grant_type);

    if !has_assertion {
        return (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": "invalid_grant"}))).into_response();
    }

    Json(serde_json::json!({
        "access_token": MINTED_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599
    }))
    .into_response()
}

fn failure(status: StatusCode) -> Response {
    let body = serde_json::json!({
        "error": {
            "code": status.as_u16(),
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT"
        }
    });
    (status, Json(body)).into_response()
}

async fn handle_recognize(
    State(state): State<Arc<MockGoogleState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    record_key(&state, &headers);
    state.recognize_requests.lock().unwrap().push(body);

    if let Some(status) = state.fail_with {
        return failure(status);
    }

    match &state.transcript {
        Some(transcript) => Json(serde_json::json!({
            "results": [{
                "alternatives": [{ "transcript": transcript, "confidence": 0.92 }]
            }]
        }))
        .into_response(),
        None => Json(serde_json::json!({})).into_response(),
    }
}

async fn handle_synthesize(
    State(state): State<Arc<MockGoogleState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    record_key(&state, &headers);
    state.synthesize_requests.lock().unwrap().push(body);

    if let Some(status) = state.fail_with {
        return failure(status);
    }

    Json(serde_json::json!({
        "audioContent": base64::engine::general_purpose::STANDARD.encode(FAKE_MP3)
    }))
    .into_response()
}
