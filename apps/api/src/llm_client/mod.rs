/// LLM Client — the single point of entry for all model provider calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through a `TextGenerator` from this module.
///
/// The model identifier is external configuration (`LLM_MODEL`); nothing here
/// assumes a particular vendor catalog.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

pub mod gemini;
pub mod groq;
pub mod prompts;

pub use gemini::GeminiClient;
pub use groq::GroqClient;

/// Transport-level timeout for a single provider call.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which hosted API serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Groq,
}

impl Provider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::Groq => write!(f, "groq"),
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "groq" => Ok(Provider::Groq),
            other => Err(anyhow!(
                "Unknown LLM_PROVIDER '{other}' (expected 'gemini' or 'groq')"
            )),
        }
    }
}

/// Per-call model selection and optional sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// The provider capability: one prompt in, the first completion's text out.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`; one instance per process.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String, LlmError>;
}

/// Builds the shared HTTP client used by every provider.
pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Constructs the configured provider client once at startup.
pub fn build_generator(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        Provider::Gemini => Arc::new(GeminiClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
        )?),
        Provider::Groq => Arc::new(GroqClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
        )?),
    };
    Ok(generator)
}

/// Reads a non-2xx body and pulls out the provider's error message if it has one.
/// Both providers wrap errors as `{"error": {"message": ...}}`.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    LlmError::Api { status, message }
}
