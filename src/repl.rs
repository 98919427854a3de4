//! Line-oriented chat loop used by the `cohere-chat` binary.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::CohereClient;
use crate::extract;

pub const EXIT_COMMAND: &str = "exit";
const PROMPT_MARKER: &str = "You: ";

/// Reads prompts from `input` until EOF or `exit`, writing one `Cohere: <reply>` line per turn.
///
/// Failed turns are reported on `output` and the loop carries on.
pub async fn run<R, W>(client: &CohereClient, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT_MARKER.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let prompt = line.trim();
        if prompt.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if prompt.is_empty() {
            continue;
        }

        let turn = match client.chat(prompt).await {
            Ok(response) => format!("Cohere: {}\n", extract::extract_reply_or_raw(&response)),
            Err(err) => {
                tracing::warn!(error = %err, "chat turn failed");
                format!("Error: {err}\n")
            }
        };
        output.write_all(turn.as_bytes()).await?;
    }

    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CohereSettings, SERVER_API_KEY_VAR};
    use axum::{Json, Router, routing::post};
    use serde_json::{Value, json};

    async fn mock_cohere(Json(body): Json<Value>) -> Json<Value> {
        let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
        match prompt {
            "raw" => Json(json!({ "finish_reason": "COMPLETE" })),
            _ => Json(json!({ "message": { "content": [{ "text": format!("re: {prompt}") }] } })),
        }
    }

    async fn client_for_mock() -> CohereClient {
        let app = Router::new().route("/v2/chat", post(mock_cohere));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut settings = CohereSettings::new(Some("test-key".to_string()), SERVER_API_KEY_VAR);
        settings.chat_url = format!("http://{addr}/v2/chat");
        settings.timeout_ms = 5_000;
        CohereClient::new(&settings).unwrap()
    }

    fn unreachable_client() -> CohereClient {
        let mut settings = CohereSettings::new(Some("test-key".to_string()), SERVER_API_KEY_VAR);
        settings.chat_url = "http://127.0.0.1:1/v2/chat".to_string();
        CohereClient::new(&settings).unwrap()
    }

    async fn transcript(client: &CohereClient, input: &str) -> String {
        let mut output = Vec::new();
        run(client, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn prints_reply_for_each_line_until_exit() {
        let client = client_for_mock().await;

        let out = transcript(&client, "hello\n\nsecond\nEXIT\nnever sent\n").await;

        assert_eq!(
            out,
            "You: Cohere: re: hello\nYou: You: Cohere: re: second\nYou: "
        );
    }

    #[tokio::test]
    async fn unrecognized_reply_is_echoed_raw() {
        let client = client_for_mock().await;

        let out = transcript(&client, "raw\n").await;

        assert!(out.contains(r#"Cohere: {"finish_reason":"COMPLETE"}"#), "{out}");
    }

    #[tokio::test]
    async fn exit_and_eof_stop_without_calling_upstream() {
        let client = unreachable_client();

        assert_eq!(transcript(&client, "  Exit  \n").await, "You: ");
        assert_eq!(transcript(&client, "").await, "You: ");
    }

    #[tokio::test]
    async fn failed_turn_is_reported_and_loop_continues() {
        let client = unreachable_client();

        let out = transcript(&client, "hello\nexit\n").await;

        assert!(out.starts_with("You: Error: failed to reach Cohere"), "{out}");
        assert!(out.ends_with("You: "), "{out}");
    }
}
