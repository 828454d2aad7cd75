//! Axum route handlers for the AI career features.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::career::mentor::{ask_mentor, MentorRequest, MentorResponse};
use crate::career::resume::{
    analyze_resume, resume_feedback, resume_text, ResumeAnalysis, ResumeSource, MAX_RESUME_BYTES,
};
use crate::career::roadmap::{generate_roadmap, Roadmap, RoadmapRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResumeFeedbackRequest {
    pub text: String,
}

/// POST /api/ai/mentor
pub async fn handle_mentor(
    State(state): State<AppState>,
    Json(request): Json<MentorRequest>,
) -> Result<Json<MentorResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    Ok(Json(ask_mentor(&state.ai, &request).await))
}

/// POST /api/ai/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = generate_roadmap(&state.ai, &request).await?;
    Ok(Json(roadmap))
}

/// POST /api/resume-analyze
///
/// Multipart form: `file` (PDF) takes precedence over `fallback_text`.
pub async fn handle_resume_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    tracing::info!("[Resume Analysis] Request received");

    let source = read_resume_source(multipart).await?;
    let text = resume_text(source).await?;
    let analysis = analyze_resume(&state.ai, &text).await?;
    Ok(Json(analysis))
}

/// POST /api/ai/resume
pub async fn handle_resume_feedback(
    State(state): State<AppState>,
    Json(request): Json<ResumeFeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let feedback = resume_feedback(&state.ai, &request.text).await?;
    Ok(Json(feedback))
}

async fn read_resume_source(mut multipart: Multipart) -> Result<ResumeSource, AppError> {
    let mut pdf: Option<ResumeSource> = None;
    let mut fallback_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                if data.len() > MAX_RESUME_BYTES {
                    return Err(AppError::Validation(
                        "Resume file exceeds the 5MB limit.".to_string(),
                    ));
                }
                if !data.is_empty() {
                    pdf = Some(ResumeSource::Pdf { file_name, data });
                }
            }
            Some("fallback_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read text: {e}")))?;
                if !text.is_empty() {
                    fallback_text = Some(text);
                }
            }
            _ => {}
        }
    }

    pdf.or(fallback_text.map(ResumeSource::Text)).ok_or_else(|| {
        tracing::warn!("[Resume Analysis] No content provided");
        AppError::Validation(
            "No resume file or text provided. Please upload a PDF or paste resume text."
                .to_string(),
        )
    })
}
