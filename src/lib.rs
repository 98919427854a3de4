pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod repl;

use axum::{
    Router,
    http::{Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

pub use client::CohereClient;
pub use config::{AppConfig, CohereSettings};
pub use error::RelayError;

#[derive(Clone)]
pub struct AppState {
    pub client: CohereClient,
}

impl AppState {
    pub fn new(client: CohereClient) -> Self {
        Self { client }
    }
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(app: Router, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await
}

/// Installs the global fmt subscriber; `RUST_LOG` overrides `default_filter`.
/// Logs go to stderr so the interactive client keeps stdout for the conversation.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
