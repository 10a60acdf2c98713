//! Mock Bedrock runtime for integration tests
//!
//! Answers `InvokeModel` with an Anthropic Messages reply and records the
//! envelope it was sent. Request signatures are not checked.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock Bedrock runtime that returns a fixed reply
pub struct MockBedrock {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockBedrockState>,
}

struct MockBedrockState {
    /// Raw JSON body to answer with
    reply: String,
    /// Reject every call with a validation error
    reject: bool,
    invocations: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockBedrock {
    /// Start a mock whose model always answers `text`
    pub async fn start(text: &str) -> anyhow::Result<Self> {
        let reply = serde_json::json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn"
        });
        Self::start_inner(reply.to_string(), false).await
    }

    /// Start a mock whose model answers with a raw JSON body
    pub async fn start_with_body(body: &str) -> anyhow::Result<Self> {
        Self::start_inner(body.to_owned(), false).await
    }

    /// Start a mock that rejects every invocation
    pub async fn start_rejecting() -> anyhow::Result<Self> {
        Self::start_inner(String::new(), true).await
    }

    async fn start_inner(reply: String, reject: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockBedrockState {
            reply,
            reject,
            invocations: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/model/{model_id}/invoke", routing::post(handle_invoke))
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

    /// Endpoint URL for configuring the mock as the Bedrock runtime
    pub fn endpoint_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Model ids and request envelopes received, in arrival order
    pub fn invocations(&self) -> Vec<(String, serde_json::Value)> {
        self.state.invocations.lock().unwrap().clone()
    }
}

impl Drop for MockBedrock {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_invoke(
    State(state): State<Arc<MockBedrockState>>,
    Path(model_id): Path<String>,
    body: Bytes,
) -> Response {
    let envelope = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.invocations.lock().unwrap().push((model_id, envelope));

    if state.reject {
        return (
            StatusCode::BAD_REQUEST,
            [
                ("content-type", "application/json"),
                ("x-amzn-errortype", "ValidationException"),
            ],
            r#"{"message":"messages: roles must alternate between \"user\" and \"assistant\""}"#,
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "application/json")],
        state.reply.clone(),
    )
        .into_response()
}
