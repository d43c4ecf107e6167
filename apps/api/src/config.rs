use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{ModelConfig, Provider};
use crate::session::DEFAULT_SESSION_TTL;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Startup fails if the provider API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Strip punctuation from profile fields on submit, not just whitespace.
    pub strict_sanitize: bool,
    /// Idle time after which a session and its history are dropped.
    pub session_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse::<Provider>()?,
            None => Provider::Gemini,
        };

        let key_var = provider.api_key_var();
        let api_key = get(key_var).with_context(|| {
            format!("Required environment variable '{key_var}' is not set (provider: {provider})")
        })?;

        let model = get("LLM_MODEL").unwrap_or_else(|| match provider {
            Provider::Gemini => DEFAULT_GEMINI_MODEL.to_string(),
            Provider::Groq => DEFAULT_GROQ_MODEL.to_string(),
        });

        let temperature = get("LLM_TEMPERATURE")
            .map(|v| v.parse::<f32>())
            .transpose()
            .context("LLM_TEMPERATURE must be a number")?;

        let max_tokens = get("LLM_MAX_TOKENS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("LLM_MAX_TOKENS must be a positive integer")?;

        let strict_sanitize = match get("STRICT_SANITIZE").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => bail!("STRICT_SANITIZE must be true or false, got '{other}'"),
        };

        let session_ttl = match get("SESSION_TTL_SECS") {
            None => DEFAULT_SESSION_TTL,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => bail!("SESSION_TTL_SECS must be greater than zero"),
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => bail!("SESSION_TTL_SECS must be a whole number of seconds, got '{raw}'"),
            },
        };

        Ok(Config {
            provider,
            api_key,
            model,
            base_url: get("LLM_BASE_URL"),
            temperature,
            max_tokens,
            strict_sanitize,
            session_ttl,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            provider: self.provider,
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
