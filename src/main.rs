use anyhow::Context;
use cohere_relay::{AppConfig, AppState, CohereClient, build_app, init_tracing, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("info");

    let config = AppConfig::from_env();
    let client = CohereClient::new(&config.cohere)?;
    tracing::info!(model = client.model(), "Cohere client ready");

    let app = build_app(AppState::new(client));

    run_server(app, &config.host, config.port)
        .await
        .with_context(|| format!("server on {}:{} failed", config.host, config.port))
}
