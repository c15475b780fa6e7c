use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The one way `/chat` can fail; upstream problems never get this far.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No message provided")]
    MissingMessage,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match self {
            ChatError::MissingMessage => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
