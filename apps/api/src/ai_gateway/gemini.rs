//! Google Gemini `generateContent` backend for the AI gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConversationTurn, GatewayError, Role, TextProvider};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for every AI call in the service.
pub const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 1.0;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> GenerateRequest<'a> {
    fn new(history: &'a [ConversationTurn], message: &'a str) -> Self {
        let mut contents: Vec<Content<'a>> = history
            .iter()
            .map(|turn| Content {
                role: turn.role.as_str(),
                parts: [Part { text: &turn.text }],
            })
            .collect();
        contents.push(Content {
            role: Role::User.as_str(),
            parts: [Part { text: message }],
        });

        Self {
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if it has any.
    fn into_text(self) -> Option<String> {
        let parts = self
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .unwrap_or_default();
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Production provider. Holds only the HTTP client and the key.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            endpoint: format!("{GEMINI_API_BASE}/{MODEL}:generateContent"),
        })
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn generate(
        &self,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, GatewayError> {
        let request_body = GenerateRequest::new(history, message);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GatewayError::provider(format!("HTTP error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::provider(format!("Malformed provider response: {e}")))?;

        let text = body
            .into_text()
            .ok_or_else(|| GatewayError::provider("Provider returned empty content"))?;

        debug!("Gemini call succeeded: reply_chars={}", text.len());
        Ok(text)
    }
}

/// Maps a non-success provider reply onto the gateway taxonomy.
/// Quota exhaustion shows up as 429, as `RESOURCE_EXHAUSTED`, or only as a
/// "429" inside the message when a proxy rewrites the status.
fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    let parsed = serde_json::from_str::<ApiError>(body).ok();
    let provider_status = parsed.as_ref().and_then(|e| e.error.status.clone());
    let message = parsed
        .map(|e| e.error.message)
        .unwrap_or_else(|| body.to_string());
    let message = format!("status {}: {message}", status.as_u16());

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || provider_status.as_deref() == Some("RESOURCE_EXHAUSTED")
        || message.contains("429");

    if rate_limited {
        GatewayError::RateLimited { message }
    } else {
        GatewayError::Provider { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_appends_message_after_history() {
        let history = vec![
            ConversationTurn::user("What should I study?"),
            ConversationTurn::model("Data structures."),
        ];
        let request = GenerateRequest::new(&history, "Which ones first?");
        let json = serde_json::to_value(&request).unwrap();

        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "Which ones first?");
        assert_eq!(json["generationConfig"]["temperature"], 1.0);
    }

    #[test]
    fn test_response_text_joins_first_candidate_parts() {
        let body: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_text_is_none() {
        let body: GenerateResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert!(body.into_text().is_none());

        let body: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(body.into_text().is_none());
    }

    #[test]
    fn test_classify_429_status_as_rate_limited() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn test_classify_resource_exhausted_behind_other_status() {
        let body = r#"{"error":{"code":503,"message":"busy","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(classify_failure(StatusCode::SERVICE_UNAVAILABLE, body).is_rate_limited());
    }

    #[test]
    fn test_classify_other_failures_as_provider_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err,
            GatewayError::Provider {
                message: "status 400: API key not valid".to_string()
            }
        );

        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "upstream crashed");
        assert!(!err.is_rate_limited());
    }
}
