use std::process;

use clap::Parser;
use cohere_relay::config::{
    CLI_API_KEY_VAR, DEFAULT_CHAT_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS,
};
use cohere_relay::{CohereClient, CohereSettings, init_tracing, repl};
use tokio::io::BufReader;

#[derive(Debug, Parser)]
#[command(
    name = "cohere-chat",
    about = "Chat with a Cohere model from the terminal; type `exit` to quit"
)]
struct Cli {
    /// Cohere API key.
    #[arg(long, env = CLI_API_KEY_VAR, hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "COHERE_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "COHERE_CHAT_URL", default_value = DEFAULT_CHAT_URL)]
    chat_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "COHERE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

impl Cli {
    fn settings(self) -> CohereSettings {
        let mut settings = CohereSettings::new(self.api_key, CLI_API_KEY_VAR);
        settings.model = self.model;
        settings.chat_url = self.chat_url;
        settings.timeout_ms = self.timeout_ms;
        settings
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = CohereClient::new(&cli.settings())?;
    let stdin = BufReader::new(tokio::io::stdin());

    repl::run(&client, stdin, tokio::io::stdout()).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing("warn");

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        process::exit(1);
    }
}
