use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub portfolio_csv: String,
    /// Upper bound on links returned per job.
    pub portfolio_max_links: usize,
    pub sender_name: String,
    pub agency_name: String,
    pub request_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            llm_api_key: require_env("GROQ_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", "https://api.groq.com/openai/v1".to_string())?,
            llm_model: env_or("LLM_MODEL", "llama-3.3-70b-versatile".to_string())?,
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", 120)?,
            portfolio_csv: env_or("PORTFOLIO_CSV", "data/portfolio.csv".to_string())?,
            portfolio_max_links: env_or("PORTFOLIO_MAX_LINKS", 2)?,
            sender_name: env_or("SENDER_NAME", "Ashish".to_string())?,
            agency_name: env_or("AGENCY_NAME", "PitchKraft".to_string())?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 300)?,
            port: env_or("PORT", 8000)?,
            rust_log: env_or("RUST_LOG", "info".to_string())?,
        };

        if config.portfolio_max_links == 0 {
            bail!("PORTFOLIO_MAX_LINKS must be at least 1");
        }

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
