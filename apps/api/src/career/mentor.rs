//! AI Mentor: multi-turn career Q&A on top of `AiGateway::chat`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai_gateway::{AiGateway, GatewayError, HistoryEntry};
use crate::career::prompts::{MENTOR_CONCISE, MENTOR_ELI5, MENTOR_PERSONA};

pub const BUSY_ANSWER: &str =
    "🤖 AI service is currently busy. Please wait 30-60 seconds and try again.";
pub const UNAVAILABLE_ANSWER: &str = "🤖 AI service temporarily unavailable. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct MentorRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub short: bool,
    #[serde(default)]
    pub eli5: bool,
}

#[derive(Debug, Serialize)]
pub struct MentorResponse {
    pub answer: String,
}

/// Prefixes the question with the mentor persona and style modifiers.
pub fn build_mentor_message(question: &str, short: bool, eli5: bool) -> String {
    let mut preamble = vec![MENTOR_PERSONA];
    if short {
        preamble.push(MENTOR_CONCISE);
    }
    if eli5 {
        preamble.push(MENTOR_ELI5);
    }
    format!("{}\n\nUser Question: {question}", preamble.join("\n"))
}

/// Asks the mentor. Provider failures become a friendly answer rather than an
/// error so the chat window always has something to show.
pub async fn ask_mentor(ai: &AiGateway, request: &MentorRequest) -> MentorResponse {
    info!(
        "Mentor question received: chars={}, short={}, eli5={}",
        request.question.len(),
        request.short,
        request.eli5
    );

    let message = build_mentor_message(&request.question, request.short, request.eli5);
    let history = request.history.as_deref().unwrap_or_default();

    let answer = match ai.chat(history, &message).await {
        Ok(answer) => answer,
        Err(GatewayError::RateLimited { .. }) => BUSY_ANSWER.to_string(),
        Err(GatewayError::Provider { .. }) => UNAVAILABLE_ANSWER.to_string(),
    };

    MentorResponse { answer }
}
