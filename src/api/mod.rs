mod handlers;
mod models;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub use handlers::{chat, index, not_found};
pub use models::{ChatRequest, ChatResponse, ErrorResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .fallback(not_found)
        .with_state(state)
}
