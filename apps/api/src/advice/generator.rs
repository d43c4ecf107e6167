//! Advice generation — one prompt, one provider call, one text.
//!
//! Failures come back as a tagged `GenerationError` rather than a panic or an
//! HTTP error. Callers that only need something to display use
//! `GenerationError::display_text`, which keeps the legacy
//! "Error: Unable to fetch advice (...)" wording.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmError, ModelConfig, TextGenerator};

/// Markdown returned by the provider, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdviceText(pub String);

impl AdviceText {
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GenerationError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("authentication rejected: {0}")]
    Authentication(String),

    #[error("model not available: {0}")]
    InvalidModel(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Prefix every failure text starts with.
pub const ERROR_MARKER: &str = "Error:";

impl GenerationError {
    /// The human-readable stand-in stored in history when generation fails.
    pub fn display_text(&self) -> String {
        format!(
            "{ERROR_MARKER} Unable to fetch advice ({}). Check your API key, model name, or internet.",
            self
        )
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) if e.is_decode() => GenerationError::MalformedResponse(e.to_string()),
            LlmError::Http(e) => GenerationError::Transport(e.to_string()),
            LlmError::Api { status, message } => match status {
                401 | 403 => GenerationError::Authentication(message),
                404 => GenerationError::InvalidModel(message),
                _ => GenerationError::Provider { status, message },
            },
            LlmError::Parse(e) => GenerationError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                GenerationError::MalformedResponse("no completion text in response".to_string())
            }
        }
    }
}

/// Sends `prompt` to the configured provider exactly once and returns the
/// first completion's text untouched. Never panics; no retries.
pub async fn generate_advice(
    llm: &dyn TextGenerator,
    prompt: &str,
    config: &ModelConfig,
) -> Result<AdviceText, GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::EmptyPrompt);
    }

    match llm.generate(prompt, config).await {
        Ok(text) => {
            info!(
                "Advice generated by {}/{} ({} chars)",
                config.provider,
                config.model,
                text.len()
            );
            Ok(AdviceText(text))
        }
        Err(e) => {
            let err = GenerationError::from(e);
            warn!(
                "Advice generation failed on {}/{}: {err}",
                config.provider, config.model
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Provider;
    use crate::test_utils::{StubBehavior, StubGenerator};

    fn model() -> ModelConfig {
        ModelConfig {
            provider: Provider::Gemini,
            model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_echo_stub_returns_text_verbatim() {
        let stub = StubGenerator::new(StubBehavior::Echo);
        let advice = generate_advice(&*stub, "You are an expert", &model())
            .await
            .unwrap();
        assert!(advice.as_str().starts_with("OK:"));
        assert_eq!(advice.as_str(), "OK:You are an");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_tagged_not_raised() {
        let stub = StubGenerator::new(StubBehavior::TransportError);
        let err = generate_advice(&*stub, "prompt", &model())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));

        let text = err.display_text();
        assert!(!text.is_empty());
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("Check your API key, model name, or internet."));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let stub = StubGenerator::new(StubBehavior::Unauthorized);
        let err = generate_advice(&*stub, "prompt", &model())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Authentication("API key not valid".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_prompt_skips_provider() {
        let stub = StubGenerator::new(StubBehavior::Echo);
        let err = generate_advice(&*stub, "  \n", &model())
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::EmptyPrompt);
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_llm_error_classification() {
        let not_found = GenerationError::from(LlmError::Api {
            status: 404,
            message: "models/gemini-pro is not found".to_string(),
        });
        assert!(matches!(not_found, GenerationError::InvalidModel(_)));

        let overloaded = GenerationError::from(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        assert_eq!(
            overloaded,
            GenerationError::Provider {
                status: 503,
                message: "overloaded".to_string()
            }
        );

        let empty = GenerationError::from(LlmError::EmptyContent);
        assert!(matches!(empty, GenerationError::MalformedResponse(_)));

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let malformed = GenerationError::from(LlmError::Parse(parse_err));
        assert!(matches!(malformed, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_display_text_embeds_reason() {
        let text = GenerationError::InvalidModel("gemini-pro".to_string()).display_text();
        assert_eq!(
            text,
            "Error: Unable to fetch advice (model not available: gemini-pro). \
             Check your API key, model name, or internet."
        );
    }
}
