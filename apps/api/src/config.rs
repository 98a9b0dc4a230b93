use std::time::Duration;

use anyhow::{Context, Result};

use crate::ml_client::{MlClientConfig, PLACEHOLDER_API_KEY};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_connect_timeout_ms: u64,
    pub llm_read_timeout_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_url: require_env("LLM_API_URL")?,
            llm_api_key: std::env::var("LLM_API_KEY")
                .unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string()),
            llm_connect_timeout_ms: parse_env("LLM_CONNECT_TIMEOUT_MS", 3_000)?,
            llm_read_timeout_ms: parse_env("LLM_READ_TIMEOUT_MS", 60_000)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn ml_client_config(&self) -> MlClientConfig {
        MlClientConfig {
            base_url: self.llm_api_url.clone(),
            api_key: Some(self.llm_api_key.clone()),
            connect_timeout: Duration::from_millis(self.llm_connect_timeout_ms),
            request_timeout: Duration::from_millis(self.llm_read_timeout_ms),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
