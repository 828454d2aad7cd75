//! Roadmap generator: week-by-week study plan for a track and goal.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::ai_gateway::AiGateway;
use crate::career::prompts::roadmap_prompt;
use crate::errors::AppError;
use crate::extractor::extract_json;

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoadmapRequest {
    pub year: Option<String>,
    pub track: Option<String>,
    /// Number or numeric string; the form field arrives as either.
    pub days: Option<Value>,
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub summary: String,
    pub weeks: Vec<RoadmapWeek>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub title: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub project: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

/// Reads the timeline length. Leading digits of a string count ("45 days" → 45);
/// missing, zero or unreadable values fall back to 30. Capped at a year.
pub fn parse_days(days: Option<&Value>) -> u32 {
    let parsed = match days {
        Some(Value::Number(n)) => n.as_f64().map(|f| f.trunc() as i64),
        Some(Value::String(s)) => {
            let s = s.trim();
            let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => n.min(MAX_DAYS as i64) as u32,
        _ => DEFAULT_DAYS,
    }
}

fn field_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

pub async fn generate_roadmap(
    ai: &AiGateway,
    request: &RoadmapRequest,
) -> Result<Roadmap, AppError> {
    let year = field_or(&request.year, "any year");
    let track = field_or(&request.track, "General Software Engineering");
    let goal = field_or(&request.goal, "General Mastery");
    let days = parse_days(request.days.as_ref());

    info!("[Roadmap] Request received: year={year}, track={track}, days={days}, goal={goal}");

    let prompt = roadmap_prompt(year, track, days, goal);
    let raw = ai.complete(&prompt).await?;
    info!("[Roadmap] Raw AI response length: {}", raw.len());

    let value = extract_json(&raw).into_result()?;
    let roadmap: Roadmap = serde_json::from_value(value)
        .map_err(|e| AppError::UnexpectedShape(format!("roadmap: {e}")))?;

    info!("[Roadmap] Parsed {} weeks for goal: {goal}", roadmap.weeks.len());
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_days_accepts_numbers_and_strings() {
        assert_eq!(parse_days(Some(&json!(45))), 45);
        assert_eq!(parse_days(Some(&json!("60"))), 60);
        assert_eq!(parse_days(Some(&json!(" 90 days"))), 90);
        assert_eq!(parse_days(Some(&json!(14.7))), 14);
    }

    #[test]
    fn test_parse_days_falls_back_to_default() {
        assert_eq!(parse_days(None), DEFAULT_DAYS);
        assert_eq!(parse_days(Some(&json!(null))), DEFAULT_DAYS);
        assert_eq!(parse_days(Some(&json!("soon"))), DEFAULT_DAYS);
        assert_eq!(parse_days(Some(&json!(0))), DEFAULT_DAYS);
        assert_eq!(parse_days(Some(&json!(-5))), DEFAULT_DAYS);
    }

    #[test]
    fn test_parse_days_caps_at_a_year() {
        assert_eq!(parse_days(Some(&json!(10_000))), MAX_DAYS);
    }

    #[test]
    fn test_roadmap_week_defaults() {
        let roadmap: Roadmap = serde_json::from_value(json!({
            "summary": "<strong>Go</strong>",
            "weeks": [{"title": "Foundations"}]
        }))
        .unwrap();
        let week = &roadmap.weeks[0];
        assert_eq!(week.status, "pending");
        assert!(week.topics.is_empty());
    }

    #[test]
    fn test_roadmap_requires_weeks() {
        let result: Result<Roadmap, _> = serde_json::from_value(json!({"summary": "x"}));
        assert!(result.is_err(), "a roadmap without weeks must be rejected");
    }

    #[test]
    fn test_field_or_ignores_blank_values() {
        assert_eq!(field_or(&Some("  ".to_string()), "fallback"), "fallback");
        assert_eq!(field_or(&None, "fallback"), "fallback");
        assert_eq!(field_or(&Some(" DSA ".to_string()), "fallback"), "DSA");
    }
}
