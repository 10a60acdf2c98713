#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};
use relay_core::ExtractPayload;

pub use error::{ChatError, Result};
pub use provider::ChatModel;
pub use server::{ChatServerBuilder, Server};
pub use types::{
    ANTHROPIC_VERSION, ChatRequest, ChatResponse, ChatTurn, ContentBlock, HISTORY_LIMIT, MessagesRequest,
    MessagesResponse, recent_turns,
};

/// Build the chat server from configuration
///
/// Loading the AWS environment is asynchronous, so unlike the speech
/// servers this one must be awaited.
pub async fn build_server(config: &relay_config::Config) -> Arc<Server> {
    Arc::new(ChatServerBuilder::new(config).build().await)
}

/// Create the endpoint router for chat, accepting bodies up to `body_limit` bytes
pub fn endpoint_router(body_limit: usize) -> Router<Arc<Server>> {
    Router::new()
        .route("/chat", post(chat))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Handle chat requests
async fn chat(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    tracing::debug!(turns = request.messages.len(), "chat handler called");

    let response = server.chat(request).await?;

    tracing::debug!("chat completion complete");

    Ok(Json(response))
}
