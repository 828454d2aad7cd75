//! Response Extractor: pulls an embedded JSON object out of freeform AI text.
//!
//! Models wrap structured output in prose ("Here is your JSON:") and code
//! fences. This is a bounded heuristic, not a parser:
//! 1. trim
//! 2. strip every ``` fence marker and a language tag right after it
//! 3. slice from the first `{` to the last `}`
//! 4. parse
//!
//! Several objects in one reply are sliced into a single span and fail to
//! parse. That outcome is pinned by a test below.
//!
//! No schema checks happen here; callers deserialize into their own shape.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Outcome of an extraction. A failure always carries the untouched input.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(Value),
    Failed { raw: String },
}

/// The reply held no parseable JSON object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("AI response did not contain parseable JSON")]
pub struct ExtractionFailure {
    pub raw: String,
}

impl Extraction {
    pub fn into_result(self) -> Result<Value, ExtractionFailure> {
        match self {
            Extraction::Parsed(value) => Ok(value),
            Extraction::Failed { raw } => Err(ExtractionFailure { raw }),
        }
    }
}

pub fn extract_json(raw: &str) -> Extraction {
    let mut text = raw.trim().to_string();

    if text.contains(FENCE) {
        text = strip_fences(&text).trim().to_string();
    }

    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text.as_str(),
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Extraction::Parsed(value),
        Err(_) => Extraction::Failed {
            raw: raw.to_string(),
        },
    }
}

/// Removes every fence marker plus a `json` tag glued to it (any case).
/// Everything else, prose and other language names included, is kept.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..JSON_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        {
            rest = &rest[JSON_TAG.len()..];
        }
    }
    out.push_str(rest);
    out
}
