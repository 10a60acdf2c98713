pub(crate) mod bedrock;

use async_trait::async_trait;

use crate::types::{MessagesRequest, MessagesResponse};

/// A hosted chat-completion model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one Messages request to `model_id` and return the parsed reply
    async fn invoke(&self, model_id: &str, request: &MessagesRequest<'_>) -> crate::error::Result<MessagesResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
