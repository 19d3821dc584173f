//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::analysis::models::AnalysisResult;
use crate::analysis::pipeline::{run_resume_screen, run_resume_screen_text, run_sentiment_analysis};
use crate::analysis::samples::{samples, SamplesResponse};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeScreenTextRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub feedback_text: String,
}

/// Fields collected from the resume-screen multipart form.
#[derive(Debug, Default)]
struct ResumeScreenForm {
    resume: Option<Bytes>,
    job_description: Option<String>,
    target_role: Option<String>,
}

impl ResumeScreenForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => form.resume = Some(field.bytes().await.map_err(invalid_form)?),
                "job_description" => {
                    form.job_description = Some(field.text().await.map_err(invalid_form)?)
                }
                "target_role" => form.target_role = Some(field.text().await.map_err(invalid_form)?),
                _ => {}
            }
        }

        Ok(form)
    }
}

fn invalid_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

fn invalid_json(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume-screen
///
/// Multipart form: `resume` (PDF), `job_description`, optional `target_role`.
pub async fn handle_resume_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = ResumeScreenForm::read(multipart).await?;

    let resume = form
        .resume
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("Please upload a resume PDF.".to_string()))?;
    let job_description = form.job_description.unwrap_or_default();

    let result = run_resume_screen(
        state.gateway.as_ref(),
        resume,
        &job_description,
        form.target_role.as_deref(),
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/resume-screen/text
///
/// Same analysis for callers that already hold the resume as text.
pub async fn handle_resume_screen_text(
    State(state): State<AppState>,
    payload: Result<Json<ResumeScreenTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(invalid_json)?;

    let result = run_resume_screen_text(
        state.gateway.as_ref(),
        &request.resume_text,
        &request.job_description,
        request.target_role.as_deref(),
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/sentiment
pub async fn handle_sentiment(
    State(state): State<AppState>,
    payload: Result<Json<SentimentRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(invalid_json)?;

    let result = run_sentiment_analysis(state.gateway.as_ref(), &request.feedback_text).await?;

    Ok(Json(result))
}

/// GET /api/v1/samples
pub async fn handle_samples() -> Json<SamplesResponse> {
    Json(samples())
}
