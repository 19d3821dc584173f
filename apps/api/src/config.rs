use anyhow::{Context, Result};

use crate::llm_client::{GenerationConfig, HarmBlockThreshold, HarmCategory, SafetyPolicy};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if the provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub safety_threshold: HarmBlockThreshold,
    /// Per-category thresholds that replace `safety_threshold` for that category only.
    pub safety_overrides: Vec<(HarmCategory, HarmBlockThreshold)>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = GenerationConfig::default();

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            temperature: optional_env("GEMINI_TEMPERATURE")?.unwrap_or(defaults.temperature),
            max_output_tokens: optional_env("GEMINI_MAX_OUTPUT_TOKENS")?
                .unwrap_or(defaults.max_output_tokens),
            safety_threshold: threshold_env("GEMINI_SAFETY_THRESHOLD")?
                .unwrap_or(HarmBlockThreshold::BlockMediumAndAbove),
            safety_overrides: safety_overrides_from_env()?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    /// Generation settings handed to the gateway at construction.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            ..GenerationConfig::default()
        }
    }

    pub fn safety_policy(&self) -> SafetyPolicy {
        self.safety_overrides.iter().fold(
            SafetyPolicy::uniform(self.safety_threshold),
            |policy, &(category, threshold)| policy.with_threshold(category, threshold),
        )
    }
}

/// Env var suffix for a category, e.g. `HATE_SPEECH`.
fn category_suffix(category: HarmCategory) -> &'static str {
    match category {
        HarmCategory::Harassment => "HARASSMENT",
        HarmCategory::HateSpeech => "HATE_SPEECH",
        HarmCategory::SexuallyExplicit => "SEXUALLY_EXPLICIT",
        HarmCategory::DangerousContent => "DANGEROUS_CONTENT",
    }
}

fn safety_overrides_from_env() -> Result<Vec<(HarmCategory, HarmBlockThreshold)>> {
    let mut overrides = Vec::new();
    for category in HarmCategory::ALL {
        let key = format!("GEMINI_SAFETY_THRESHOLD_{}", category_suffix(category));
        if let Some(threshold) = threshold_env(&key)? {
            overrides.push((category, threshold));
        }
    }
    Ok(overrides)
}

fn threshold_env(key: &str) -> Result<Option<HarmBlockThreshold>> {
    match std::env::var(key) {
        Ok(raw) => HarmBlockThreshold::from_name(&raw)
            .map(Some)
            .with_context(|| format!("{key} '{raw}' is not a known threshold")),
        Err(_) => Ok(None),
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}
