//! Resume analysis: scores an uploaded PDF (or pasted text) and suggests improvements.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::ai_gateway::AiGateway;
use crate::career::prompts::{resume_analysis_prompt, resume_feedback_prompt};
use crate::errors::AppError;
use crate::extractor::extract_json;

/// Upload cap for resume PDFs.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
/// Only this much resume text is sent to the model.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Where the resume content came from.
#[derive(Debug)]
pub enum ResumeSource {
    Pdf { file_name: String, data: Bytes },
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default)]
    pub improved_summary: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub jobs_html: String,
}

/// Models return the score as 82, 82.5 or "82". Anything else is a shape error.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let score = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    score
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid score: {value}")))
}

/// Turns the upload into plain text. PDF parsing is CPU-bound and runs on the
/// blocking pool.
pub async fn resume_text(source: ResumeSource) -> Result<String, AppError> {
    let text = match source {
        ResumeSource::Pdf { file_name, data } => {
            info!("[Resume Analysis] Processing PDF file: {file_name}");
            let extracted = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data)
            })
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            })?;

            match extracted {
                Ok(text) => {
                    info!("[Resume Analysis] PDF extracted length: {}", text.len());
                    text
                }
                Err(e) => {
                    warn!("[Resume Analysis] PDF parse error: {e}");
                    return Err(AppError::Validation(
                        "Failed to read PDF file. Ensure it is a valid, non-encrypted PDF."
                            .to_string(),
                    ));
                }
            }
        }
        ResumeSource::Text(text) => {
            info!("[Resume Analysis] Using fallback text");
            text
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume content is empty. Please check your file.".to_string(),
        ));
    }
    Ok(text)
}

/// First `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub async fn analyze_resume(ai: &AiGateway, text: &str) -> Result<ResumeAnalysis, AppError> {
    let prompt = resume_analysis_prompt(truncate_chars(text, MAX_PROMPT_CHARS));

    info!("[Resume Analysis] Sending to AI...");
    let raw = ai.complete(&prompt).await?;

    let value = extract_json(&raw).into_result()?;
    let analysis: ResumeAnalysis = serde_json::from_value(value)
        .map_err(|e| AppError::UnexpectedShape(format!("resume analysis: {e}")))?;

    info!("[Resume Analysis] Success. Score: {}", analysis.score);
    Ok(analysis)
}

/// Legacy feedback endpoint: the extracted object is passed through untouched.
pub async fn resume_feedback(ai: &AiGateway, text: &str) -> Result<Value, AppError> {
    let raw = ai.complete(&resume_feedback_prompt(text)).await?;
    Ok(extract_json(&raw).into_result()?)
}

/// Builds a one-page PDF showing `text` in Helvetica, with a correct xref table.
#[cfg(test)]
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 712 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_accepts_common_model_outputs() {
        for (score, expected) in [
            (json!(82), 82),
            (json!(82.6), 83),
            (json!("75"), 75),
            (json!("90%"), 90),
            (json!(140), 100),
            (json!(-3), 0),
        ] {
            let analysis: ResumeAnalysis =
                serde_json::from_value(json!({ "score": score })).unwrap();
            assert_eq!(analysis.score, expected);
        }
    }

    #[test]
    fn test_score_is_required() {
        let result: Result<ResumeAnalysis, _> =
            serde_json::from_value(json!({"feedback": "<ul></ul>"}));
        assert!(result.is_err());

        let result: Result<ResumeAnalysis, _> =
            serde_json::from_value(json!({"score": "excellent"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("₹16,000 stipend", 3), "₹16");
        assert_eq!(truncate_chars("short", 4000), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let err = resume_text(ResumeSource::Text("   \n".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_text_is_extracted_from_pdf() {
        let text = resume_text(ResumeSource::Pdf {
            file_name: "resume.pdf".to_string(),
            data: Bytes::from(single_page_pdf("Rust Developer Intern")),
        })
        .await
        .unwrap();
        assert!(text.contains("Rust"), "extracted text was {text:?}");
        assert!(text.contains("Intern"), "extracted text was {text:?}");
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_a_validation_error() {
        let err = resume_text(ResumeSource::Pdf {
            file_name: "resume.pdf".to_string(),
            data: Bytes::from_static(b"definitely not a pdf"),
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
