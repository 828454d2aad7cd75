//! AI Gateway: the single point of entry for all generative-text calls.
//!
//! No other module talks to the provider directly. Handlers receive an
//! `AiGateway` through `AppState` and call `complete` or `chat`.
//!
//! The gateway keeps no state between calls: no retries, no cache, no session.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub mod gemini;
pub mod prompts;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Provider rate limited the request: {message}")]
    RateLimited { message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },
}

impl GatewayError {
    pub fn provider(message: impl Into<String>) -> Self {
        GatewayError::Provider {
            message: message.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited { .. })
    }
}

/// Speaker of a conversation turn, in the provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One normalized message of a chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

#[cfg(test)]
impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A history entry as sent by the browser. Nothing here is trusted:
/// the frontend stores turns in provider shape (`parts: [{text}]`),
/// older clients send a flat `text`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub role: Option<String>,
    pub text: Option<String>,
    pub parts: Option<Vec<HistoryPart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryPart {
    pub text: Option<String>,
}

impl HistoryEntry {
    fn text(&self) -> Option<&str> {
        self.text.as_deref().or_else(|| {
            self.parts
                .as_ref()
                .and_then(|parts| parts.first())
                .and_then(|part| part.text.as_deref())
        })
    }
}

/// Normalizes caller-supplied history into what the provider accepts:
/// 1. entries without a role or without text are dropped
/// 2. any role other than "model" becomes `User`
/// 3. leading turns are dropped until the history opens with a `User` turn
pub fn normalize_history(entries: &[HistoryEntry]) -> Vec<ConversationTurn> {
    let turns = entries.iter().filter_map(|entry| {
        let role = entry.role.as_deref().filter(|r| !r.is_empty())?;
        let text = entry.text()?;
        let role = if role == "model" {
            Role::Model
        } else {
            Role::User
        };
        Some(ConversationTurn {
            role,
            text: text.to_string(),
        })
    });

    turns.skip_while(|turn| turn.role != Role::User).collect()
}

/// The outbound seam. `history` is already normalized; `message` is the
/// newest user turn.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(
        &self,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, GatewayError>;
}

/// Handle to the configured provider, cloned into every request.
#[derive(Clone)]
pub struct AiGateway {
    provider: Arc<dyn TextProvider>,
}

impl AiGateway {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// One-shot completion: a single user prompt, raw reply text back.
    pub async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!("AI completion: prompt_chars={}", prompt.len());
        self.provider
            .generate(&[], prompt)
            .await
            .inspect_err(log_failure)
    }

    /// Multi-turn chat: replays the normalized history, then sends `message`.
    pub async fn chat(
        &self,
        history: &[HistoryEntry],
        message: &str,
    ) -> Result<String, GatewayError> {
        let normalized = normalize_history(history);
        debug!(
            "AI chat: received_turns={}, submitted_turns={}",
            history.len(),
            normalized.len()
        );
        self.provider
            .generate(&normalized, message)
            .await
            .inspect_err(log_failure)
    }
}

fn log_failure(err: &GatewayError) {
    if err.is_rate_limited() {
        warn!("AI call rejected: {err}");
    } else {
        warn!("AI call failed: {err}");
    }
}
