use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    chat::{
        dto::{ChatRequest, ChatResponse},
        errors::ChatError,
    },
    state::AppState,
};

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

/// A body that is absent or not JSON counts as a missing message.
#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Option<Json<ChatRequest>>,
) -> Result<Json<ChatResponse>, ChatError> {
    let message = payload.and_then(|Json(req)| req.message);
    let reply = state.chat.respond(message.as_deref()).await?;
    Ok(Json(ChatResponse { reply }))
}
