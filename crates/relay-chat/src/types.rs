use serde::{Deserialize, Serialize};

/// Number of most recent turns forwarded to the model
pub const HISTORY_LIMIT: usize = 20;

/// Protocol tag required by Anthropic models on Bedrock
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// One message of the dialogue
///
/// `role` is passed through as given; the model decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Body of `/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// Response of `/chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// The trailing window of `turns` sent to the model, in original order
pub fn recent_turns(turns: &[ChatTurn]) -> &[ChatTurn] {
    &turns[turns.len().saturating_sub(HISTORY_LIMIT)..]
}

/// Anthropic Messages envelope as accepted by `InvokeModel`
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub anthropic_version: &'static str,
    pub max_tokens: u32,
    pub messages: &'a [ChatTurn],
}

impl<'a> MessagesRequest<'a> {
    pub const fn new(messages: &'a [ChatTurn], max_tokens: u32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens,
            messages,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first `text` content block
    ///
    /// Blocks of other kinds, such as `tool_use`, are skipped.
    pub fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
    }
}
