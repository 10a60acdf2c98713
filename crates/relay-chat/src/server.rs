use std::sync::Arc;

use crate::{
    error::ChatError,
    provider::{ChatModel, bedrock::BedrockModel},
    types::{ChatRequest, ChatResponse, MessagesRequest, recent_turns},
};

/// Chat service backing `/chat`
pub struct Server {
    model: Arc<dyn ChatModel>,
    model_id: Option<String>,
    max_tokens: u32,
    body_limit: usize,
}

impl Server {
    /// Create a server around an already constructed model client
    pub fn new(model: Arc<dyn ChatModel>, model_id: Option<String>, max_tokens: u32) -> Self {
        Self {
            model,
            model_id,
            max_tokens,
            body_limit: relay_config::DEFAULT_CHAT_BODY_BYTES,
        }
    }

    /// Cap request bodies at `bytes`
    #[must_use]
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Maximum accepted request body size in bytes
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Answer the conversation with the model's next reply
    pub async fn chat(&self, request: ChatRequest) -> crate::error::Result<ChatResponse> {
        let model_id = relay_config::non_empty(self.model_id.as_deref())
            .ok_or(ChatError::MissingConfig("chat.model_id"))?;

        let turns = recent_turns(&request.messages);

        if turns.len() < request.messages.len() {
            tracing::debug!(
                dropped = request.messages.len() - turns.len(),
                "truncated conversation history"
            );
        }

        let reply = self
            .model
            .invoke(model_id, &MessagesRequest::new(turns, self.max_tokens))
            .await?;

        let response = reply
            .first_text()
            .ok_or_else(|| ChatError::MalformedResponse("response has no text content block".to_owned()))?;

        Ok(ChatResponse { response })
    }
}

/// Builder for constructing the chat server from configuration
pub struct ChatServerBuilder<'a> {
    config: &'a relay_config::Config,
}

impl<'a> ChatServerBuilder<'a> {
    pub const fn new(config: &'a relay_config::Config) -> Self {
        Self { config }
    }

    pub async fn build(self) -> Server {
        let chat = &self.config.chat;

        if relay_config::non_empty(chat.model_id.as_deref()).is_none() {
            tracing::warn!("no chat model configured, /chat will fail until CLAUDE_MODEL_ID is set");
        }

        let model = BedrockModel::new(chat).await;

        tracing::debug!("Chat server initialized with provider: {}", model.name());

        Server::new(Arc::new(model), chat.model_id.clone(), chat.max_tokens).with_body_limit(chat.max_body_bytes)
    }
}
