//! Chat endpoint payloads

use serde::{Deserialize, Serialize};

use crate::domain::{ChatRequest, DomainError};

/// `POST /api/chat` body
///
/// A missing or null message is treated like an empty one so that both
/// produce the same validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<ChatPayload> for ChatRequest {
    type Error = DomainError;

    fn try_from(payload: ChatPayload) -> Result<Self, Self::Error> {
        ChatRequest::new(payload.message.unwrap_or_default())
    }
}

/// `POST /api/chat` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
}
