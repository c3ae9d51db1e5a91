//! Chat endpoint handler

use std::time::Instant;

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatPayload, ChatResponse, Json};
use crate::domain::ChatRequest;
use crate::infrastructure::observability::record_chat_payload;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>, ApiError> {
    let start = Instant::now();
    let request = ChatRequest::try_from(payload)?;

    info!(request_bytes = request.len(), "Chat message received");

    let result = state.chain.resolve(&request).await?;
    let reply = state.render_reply(&result.reply);

    record_chat_payload(result.reply.source.tag(), request.len(), reply.len());

    info!(
        source = %result.reply.source,
        rule = result.local_rule.as_deref().unwrap_or("-"),
        attempts = result.attempts.len(),
        request_bytes = request.len(),
        reply_bytes = reply.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chat reply sent"
    );

    Ok(Json(ChatResponse { reply }))
}
