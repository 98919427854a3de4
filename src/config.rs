use std::env;

pub const DEFAULT_MODEL: &str = "command-a-03-2025";
pub const DEFAULT_CHAT_URL: &str = "https://api.cohere.com/v2/chat";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable holding the server's API key.
pub const SERVER_API_KEY_VAR: &str = "COHERE_API_KEY";
/// Environment variable holding the interactive client's API key.
pub const CLI_API_KEY_VAR: &str = "api_key";

#[derive(Debug, Clone)]
pub struct CohereSettings {
    pub api_key: Option<String>,
    /// Variable the key was read from, reported when it is missing.
    pub api_key_var: &'static str,
    pub chat_url: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl CohereSettings {
    pub fn new(api_key: Option<String>, api_key_var: &'static str) -> Self {
        Self {
            api_key,
            api_key_var,
            chat_url: DEFAULT_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_lookup(api_key_var: &'static str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(api_key_var).filter(|value| !value.trim().is_empty());

        let chat_url = lookup("COHERE_CHAT_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_URL.to_string());

        let model = lookup("COHERE_MODEL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = lookup("COHERE_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_key,
            api_key_var,
            chat_url,
            model,
            timeout_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cohere: CohereSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            host,
            port,
            cohere: CohereSettings::from_lookup(SERVER_API_KEY_VAR, &lookup),
        }
    }
}
