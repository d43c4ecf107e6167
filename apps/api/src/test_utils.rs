//! Shared helpers for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use crate::config::Config;
use crate::llm_client::{LlmError, ModelConfig, Provider, TextGenerator};
use crate::models::profile::UserProfile;
use crate::session::{SessionStore, DEFAULT_SESSION_TTL};
use crate::state::AppState;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

/// How the stub provider answers.
#[derive(Clone, Copy)]
pub enum StubBehavior {
    /// Returns `"OK:" + first 10 chars of the prompt`.
    Echo,
    /// Fails inside the HTTP transport before any response arrives.
    TransportError,
    /// Fails with a 401 from the provider.
    Unauthorized,
}

/// A `TextGenerator` that never touches the network and counts its calls.
pub struct StubGenerator {
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, _config: &ModelConfig) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            StubBehavior::Echo => {
                let head: String = prompt.chars().take(10).collect();
                Ok(format!("OK:{head}"))
            }
            StubBehavior::TransportError => {
                // An unparseable URL makes reqwest fail without touching the network.
                match reqwest::Client::new().get("http://[::1").send().await {
                    Err(e) => Err(LlmError::Http(e)),
                    Ok(_) => Err(LlmError::EmptyContent),
                }
            }
            StubBehavior::Unauthorized => Err(LlmError::Api {
                status: 401,
                message: "API key not valid".to_string(),
            }),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        provider: Provider::Gemini,
        api_key: "test-key".to_string(),
        model: "gemini-2.5-flash".to_string(),
        base_url: None,
        temperature: None,
        max_tokens: None,
        strict_sanitize: true,
        session_ttl: DEFAULT_SESSION_TTL,
        port: 8080,
        rust_log: "info".to_string(),
    }
}

pub fn test_state(generator: Arc<dyn TextGenerator>) -> AppState {
    AppState {
        llm: generator,
        sessions: SessionStore::new(DEFAULT_SESSION_TTL),
        config: test_config(),
    }
}

/// The happy-path profile used across tests.
pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Asha".to_string(),
        interests: "AI".to_string(),
        skills: "Python".to_string(),
        education: "B.Tech CSE".to_string(),
        goals: "Data Scientist".to_string(),
        ..Default::default()
    }
}
