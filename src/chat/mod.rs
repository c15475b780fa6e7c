use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod errors;
pub mod gemini;
pub mod handlers;
pub mod relay;
pub mod triggers;

pub fn router() -> Router<AppState> {
    handlers::chat_routes()
}
