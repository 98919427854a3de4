use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};

use crate::AppState;
use crate::error::RelayError;

use super::models::{ChatRequest, ChatResponse};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cohere Chatbot</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
    <div id="root"></div>
    <script type="module" src="/static/index.js"></script>
</body>
</html>
"#;

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let Json(payload) =
        payload.map_err(|rejection| RelayError::InvalidBody(rejection.body_text()))?;
    let prompt = payload.validated_prompt()?;

    tracing::info!(prompt_chars = prompt.chars().count(), "relaying prompt");
    let reply = state.client.reply(prompt).await?;

    Ok(Json(ChatResponse { reply }))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn not_found() -> RelayError {
    RelayError::RouteNotFound
}
