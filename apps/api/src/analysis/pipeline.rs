//! Analysis pipeline: the two entry operations called by the HTTP layer.
//!
//! Flow: (PDF → text) → validate → render prompt → gateway → normalize.
//!
//! One gateway call per request, no retries. Every failure comes back as an
//! `AnalysisError`; nothing here panics or propagates a foreign error type.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::analysis::models::{AnalysisError, AnalysisKind, AnalysisRequest, AnalysisResult};
use crate::analysis::normalizer::{normalize_result, FenceStyle};
use crate::analysis::prompt_builder::build_prompt;
use crate::extraction;
use crate::llm_client::LlmGateway;

const NO_PDF_TEXT: &str = "Could not extract text from the uploaded PDF.";

/// Screens an uploaded PDF resume against a job description.
pub async fn run_resume_screen(
    gateway: &dyn LlmGateway,
    resume_pdf: Bytes,
    job_description: &str,
    target_role: Option<&str>,
) -> Result<AnalysisResult, AnalysisError> {
    // Checked before extraction so a blank form never costs a PDF parse.
    if job_description.trim().is_empty() {
        return Err(AnalysisError::empty_input("Job description text is empty."));
    }

    let resume_text = extract_resume_text(resume_pdf).await?;
    run_resume_screen_text(gateway, &resume_text, job_description, target_role).await
}

/// Screens resume text that has already been extracted.
pub async fn run_resume_screen_text(
    gateway: &dyn LlmGateway,
    resume_text: &str,
    job_description: &str,
    target_role: Option<&str>,
) -> Result<AnalysisResult, AnalysisError> {
    let mut request = AnalysisRequest::resume_screen(resume_text, job_description);
    if let Some(role) = target_role {
        request = request.with_target_role(role);
    }
    run_analysis(gateway, &request).await
}

/// Classifies sentiment and attrition risk in employee feedback.
pub async fn run_sentiment_analysis(
    gateway: &dyn LlmGateway,
    feedback_text: &str,
) -> Result<AnalysisResult, AnalysisError> {
    run_analysis(gateway, &AnalysisRequest::sentiment_analysis(feedback_text)).await
}

/// Runs one request through prompt, gateway and normalizer.
pub async fn run_analysis(
    gateway: &dyn LlmGateway,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisError> {
    let prompt = build_prompt(request)?;

    let analysis_id = Uuid::new_v4();
    info!("Analysis {analysis_id}: starting {}", request.kind.as_str());

    let output = gateway.generate(&prompt).await.map_err(|e| {
        error!("Analysis {analysis_id}: LLM call failed: {e}");
        AnalysisError::from(e)
    })?;

    if let Some(reason) = output.block_reason.as_deref() {
        warn!("Analysis {analysis_id}: content blocked due to {reason}");
        return Err(AnalysisError::blocked(reason));
    }

    debug!(
        "Analysis {analysis_id}: response fence style {:?}",
        FenceStyle::classify(output.text.trim())
    );

    let result = normalize_result(&output.text, request.kind).map_err(|e| {
        warn!(
            "Analysis {analysis_id}: {} ({})",
            e.message,
            e.details.as_deref().unwrap_or_default()
        );
        e
    })?;

    info!("Analysis {analysis_id}: {}", summarize(request.kind, &result));
    Ok(result)
}

/// One-line digest of a result for the logs.
fn summarize(kind: AnalysisKind, result: &AnalysisResult) -> String {
    let field = |key: &str| match result.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    };

    match kind {
        AnalysisKind::ResumeScreen => format!(
            "match score {}%",
            field("overall_match_score_percentage")
        ),
        AnalysisKind::SentimentAnalysis => format!(
            "sentiment {} (score {}), attrition risk {}",
            field("overall_sentiment"),
            field("sentiment_score"),
            field("potential_attrition_risk")
        ),
    }
}

async fn extract_resume_text(resume_pdf: Bytes) -> Result<String, AnalysisError> {
    let text = tokio::task::spawn_blocking(move || extraction::extract_text(&resume_pdf))
        .await
        .unwrap_or_else(|e| {
            error!("PDF extraction task failed: {e}");
            None
        });

    text.ok_or_else(|| AnalysisError::empty_input(NO_PDF_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ErrorKind, RESUME_SCREEN_KEYS};
    use crate::llm_client::stub::StubGateway;

    const RESUME_JSON: &str = r#"```json
{
  "extracted_skills": ["Python", "AWS"],
  "years_of_experience": "4 years",
  "education_match": "BSc Computer Science, aligned",
  "key_qualifications_match": ["Python services in production"],
  "missing_critical_skills": ["Azure"],
  "overall_match_score_percentage": 82,
  "summary_for_recruiter": "Strong Python background."
}
```"#;

    const SENTIMENT_JSON: &str = r#"{"overall_sentiment": "Negative", "sentiment_score": -0.7, "key_themes": ["Workload", "Management"], "potential_attrition_risk": "High", "suggested_engagement_strategies": ["Hold a workload review"]}"#;

    #[tokio::test]
    async fn test_resume_screen_text_returns_all_keys() {
        let gateway = StubGateway::replying(RESUME_JSON);
        let result = run_resume_screen_text(&gateway, "Jane Doe, Python", "Python, AWS", None)
            .await
            .unwrap();

        for key in RESUME_SCREEN_KEYS {
            assert!(result.contains_key(key), "missing {key}");
        }
        assert_eq!(result["overall_match_score_percentage"], 82);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_resume_prompt_reaches_gateway() {
        let gateway = StubGateway::replying(RESUME_JSON);
        run_resume_screen_text(&gateway, "Jane Doe", "Kotlin role", Some("Android Engineer"))
            .await
            .unwrap();

        let prompt = gateway.last_prompt().unwrap();
        assert!(prompt.contains("Jane Doe"));
        assert!(prompt.contains("Kotlin role"));
        assert!(prompt.contains("Android Engineer"));
    }

    #[tokio::test]
    async fn test_empty_resume_text_never_calls_gateway() {
        let gateway = StubGateway::replying(RESUME_JSON);
        let err = run_resume_screen_text(&gateway, "", "Python", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInput);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_job_description_never_calls_gateway() {
        let gateway = StubGateway::replying(RESUME_JSON);
        let err = run_resume_screen(&gateway, Bytes::from_static(b"%PDF-1.5"), "  ", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInput);
        assert_eq!(err.message, "Job description text is empty.");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_empty_input() {
        let gateway = StubGateway::replying(RESUME_JSON);
        let err = run_resume_screen(&gateway, Bytes::from_static(b"not a pdf"), "Python", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInput);
        assert_eq!(err.message, NO_PDF_TEXT);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_feedback_never_calls_gateway() {
        let gateway = StubGateway::replying(SENTIMENT_JSON);
        let err = run_sentiment_analysis(&gateway, "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInput);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_sentiment_analysis_parses_unfenced_json() {
        let gateway = StubGateway::replying(SENTIMENT_JSON);
        let result = run_sentiment_analysis(&gateway, "The workload has been insane lately.")
            .await
            .unwrap();
        assert_eq!(result["potential_attrition_risk"], "High");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_blocked_output_names_category() {
        let gateway = StubGateway::blocking("HARM_CATEGORY_HATE_SPEECH");
        let err = run_sentiment_analysis(&gateway, "some feedback")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProviderBlocked);
        assert!(err.message.contains("HARM_CATEGORY_HATE_SPEECH"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let gateway = StubGateway::unavailable();
        let err = run_sentiment_analysis(&gateway, "some feedback")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProviderFailure);
        assert!(err.details.unwrap().contains("503"));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed_with_raw_text() {
        let gateway = StubGateway::replying("Sure! Here is my analysis: the employee is happy.");
        let err = run_sentiment_analysis(&gateway, "I love it here")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedJson);
        assert_eq!(
            err.raw_text.as_deref(),
            Some("Sure! Here is my analysis: the employee is happy.")
        );
    }

    #[tokio::test]
    async fn test_incomplete_result_is_malformed() {
        let gateway = StubGateway::replying(r#"{"overall_sentiment": "Neutral"}"#);
        let err = run_sentiment_analysis(&gateway, "It pays the bills.")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedJson);
        assert!(err.details.unwrap().contains("key_themes"));
    }

    #[test]
    fn test_summarize_sentiment() {
        let result: AnalysisResult = serde_json::from_str(SENTIMENT_JSON).unwrap();
        assert_eq!(
            summarize(AnalysisKind::SentimentAnalysis, &result),
            "sentiment Negative (score -0.7), attrition risk High"
        );
    }
}
