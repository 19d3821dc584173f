use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Role the resume-screen template targets when the caller names none.
pub const DEFAULT_TARGET_ROLE: &str = "Software Engineer";

pub const RESUME_SCREEN_KEYS: [&str; 7] = [
    "extracted_skills",
    "years_of_experience",
    "education_match",
    "key_qualifications_match",
    "missing_critical_skills",
    "overall_match_score_percentage",
    "summary_for_recruiter",
];

pub const SENTIMENT_ANALYSIS_KEYS: [&str; 5] = [
    "overall_sentiment",
    "sentiment_score",
    "key_themes",
    "potential_attrition_risk",
    "suggested_engagement_strategies",
];

/// Parsed model output. Shape depends on the request kind; see the `*_KEYS` lists.
pub type AnalysisResult = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    ResumeScreen,
    SentimentAnalysis,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::ResumeScreen => "resume_screen",
            AnalysisKind::SentimentAnalysis => "sentiment_analysis",
        }
    }

    /// Keys every successful result of this kind must carry.
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            AnalysisKind::ResumeScreen => &RESUME_SCREEN_KEYS,
            AnalysisKind::SentimentAnalysis => &SENTIMENT_ANALYSIS_KEYS,
        }
    }
}

/// One user-initiated analysis. `primary_text` is the resume or the feedback;
/// `secondary_text` is the job description and is only used for resume screens.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub kind: AnalysisKind,
    pub primary_text: String,
    pub secondary_text: String,
    pub target_role: String,
}

impl AnalysisRequest {
    pub fn resume_screen(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            kind: AnalysisKind::ResumeScreen,
            primary_text: resume_text.into(),
            secondary_text: job_description.into(),
            target_role: DEFAULT_TARGET_ROLE.to_string(),
        }
    }

    pub fn sentiment_analysis(feedback_text: impl Into<String>) -> Self {
        Self {
            kind: AnalysisKind::SentimentAnalysis,
            primary_text: feedback_text.into(),
            secondary_text: String::new(),
            target_role: DEFAULT_TARGET_ROLE.to_string(),
        }
    }

    /// Blank roles keep the default.
    pub fn with_target_role(mut self, role: &str) -> Self {
        let role = role.trim();
        if !role.is_empty() {
            self.target_role = role.to_string();
        }
        self
    }

    /// Rejects blank inputs before any prompt is built.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self.kind {
            AnalysisKind::ResumeScreen => {
                if self.primary_text.trim().is_empty() {
                    return Err(AnalysisError::empty_input("Resume text is empty."));
                }
                if self.secondary_text.trim().is_empty() {
                    return Err(AnalysisError::empty_input("Job description text is empty."));
                }
            }
            AnalysisKind::SentimentAnalysis => {
                if self.primary_text.trim().is_empty() {
                    return Err(AnalysisError::empty_input("Feedback text is empty."));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    ProviderBlocked,
    ProviderFailure,
    MalformedJson,
}

/// Typed failure of the analysis pipeline. Serializes as
/// `{error, details?, raw_response?}`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Option<String>,
    /// Untruncated model output, kept for whoever has to inspect it.
    pub raw_text: Option<String>,
}

impl AnalysisError {
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::EmptyInput,
            message: message.into(),
            details: None,
            raw_text: None,
        }
    }

    pub fn blocked(reason: &str) -> Self {
        Self {
            kind: ErrorKind::ProviderBlocked,
            message: format!("Content blocked: {reason}"),
            details: None,
            raw_text: None,
        }
    }

    pub fn provider_failure(details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ProviderFailure,
            message: "An unexpected error occurred with the Gemini API.".to_string(),
            details: Some(details.into()),
            raw_text: None,
        }
    }

    pub fn malformed_json(details: impl Into<String>, raw_text: &str) -> Self {
        Self {
            kind: ErrorKind::MalformedJson,
            message: "Failed to parse LLM response as JSON".to_string(),
            details: Some(details.into()),
            raw_text: Some(raw_text.to_string()),
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        AnalysisError::provider_failure(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a str>,
}

impl Serialize for AnalysisError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorBody {
            error: &self.message,
            details: self.details.as_deref(),
            raw_response: self.raw_text.as_deref(),
        }
        .serialize(serializer)
    }
}
