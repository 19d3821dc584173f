//! LLM Client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider directly.
//! Analysis code depends on the `LlmGateway` trait, never on `GeminiClient`.
//!
//! Model: gemini-2.0-flash (hardcoded, not configurable)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod settings;
#[cfg(test)]
pub mod stub;

pub use settings::{GenerationConfig, HarmBlockThreshold, HarmCategory, SafetyPolicy};

use settings::SafetySetting;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all LLM calls.
pub const MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Finish reasons that mean the provider withheld the candidate.
const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no candidates")]
    EmptyContent,
}

/// What came back from one generation call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawModelOutput {
    pub text: String,
    /// Set only when the provider refused to generate; `text` is then empty.
    pub block_reason: Option<String>,
}

impl RawModelOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            block_reason: None,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            block_reason: Some(reason.into()),
        }
    }
}

/// Outbound port to a hosted text-generation model.
///
/// Implementors own their generation and safety settings; callers only pass
/// the prompt. One call, no streaming, no retries.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<RawModelOutput, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    #[serde(default)]
    pub blocked: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GenerateContentResponse {
    /// Collapses the provider response into text or a block reason.
    pub fn into_output(self) -> Result<RawModelOutput, LlmError> {
        if let Some(feedback) = self.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                let reason = blocked_category(&feedback.safety_ratings).unwrap_or(reason);
                return Ok(RawModelOutput::blocked(reason));
            }
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyContent)?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let withheld = candidate
            .finish_reason
            .as_deref()
            .is_some_and(|r| BLOCKING_FINISH_REASONS.contains(&r));

        if withheld && text.trim().is_empty() {
            let reason = blocked_category(&candidate.safety_ratings)
                .or(candidate.finish_reason)
                .unwrap_or_default();
            return Ok(RawModelOutput::blocked(reason));
        }

        Ok(RawModelOutput::text(text))
    }
}

fn blocked_category(ratings: &[SafetyRating]) -> Option<String> {
    ratings
        .iter()
        .find(|r| r.blocked)
        .map(|r| r.category.clone())
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. Cheap to clone; settings are fixed at construction.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    generation: GenerationConfig,
    safety: SafetyPolicy,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        generation: GenerationConfig,
        safety: SafetyPolicy,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{GEMINI_API_BASE}/models/{MODEL}:generateContent"),
            generation,
            safety,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: &self.generation,
            safety_settings: self.safety.settings(),
        }
    }
}

#[async_trait]
impl LlmGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<RawModelOutput, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}", status);
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}, total_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        parsed.into_output()
    }
}
