//! Generation and content-safety settings sent with every Gemini call.
//!
//! Both values are built once at startup and owned by the gateway; nothing
//! here is mutable after construction.

use serde::Serialize;

/// Sampling settings. Serialized as the provider's `generationConfig` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

/// Harm categories the provider scores prompts and candidates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];
}

/// Blocking threshold, ordered strictest first: `BlockLowAndAbove` withholds
/// the most content, `BlockNone` withholds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

impl HarmBlockThreshold {
    /// Parses the provider's wire name, e.g. `BLOCK_ONLY_HIGH`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "BLOCK_LOW_AND_ABOVE" => Some(Self::BlockLowAndAbove),
            "BLOCK_MEDIUM_AND_ABOVE" => Some(Self::BlockMediumAndAbove),
            "BLOCK_ONLY_HIGH" => Some(Self::BlockOnlyHigh),
            "BLOCK_NONE" => Some(Self::BlockNone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// One independent threshold per harm category.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyPolicy {
    settings: Vec<SafetySetting>,
}

impl SafetyPolicy {
    /// Same threshold for every category.
    pub fn uniform(threshold: HarmBlockThreshold) -> Self {
        Self {
            settings: HarmCategory::ALL
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
        }
    }

    /// Overrides the threshold for a single category.
    pub fn with_threshold(mut self, category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        match self.settings.iter_mut().find(|s| s.category == category) {
            Some(setting) => setting.threshold = threshold,
            None => self.settings.push(SafetySetting {
                category,
                threshold,
            }),
        }
        self
    }

    pub fn settings(&self) -> &[SafetySetting] {
        &self.settings
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::uniform(HarmBlockThreshold::BlockMediumAndAbove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let json = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(json["topP"], 1.0);
        assert_eq!(json["topK"], 1);
        assert_eq!(json["maxOutputTokens"], 2048);
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_safety_setting_wire_names() {
        let json = serde_json::to_value(SafetyPolicy::default().settings()).unwrap();
        assert_eq!(json[1]["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json[1]["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        assert_eq!(json[2]["category"], "HARM_CATEGORY_SEXUALLY_EXPLICIT");
    }

    #[test]
    fn test_threshold_ordering_strictest_first() {
        assert!(HarmBlockThreshold::BlockLowAndAbove < HarmBlockThreshold::BlockMediumAndAbove);
        assert!(HarmBlockThreshold::BlockMediumAndAbove < HarmBlockThreshold::BlockOnlyHigh);
        assert!(HarmBlockThreshold::BlockOnlyHigh < HarmBlockThreshold::BlockNone);
    }

    #[test]
    fn test_threshold_from_name_is_case_insensitive() {
        assert_eq!(
            HarmBlockThreshold::from_name("block_only_high"),
            Some(HarmBlockThreshold::BlockOnlyHigh)
        );
        assert_eq!(HarmBlockThreshold::from_name("BLOCK_SOME"), None);
    }

    #[test]
    fn test_with_threshold_overrides_one_category() {
        let policy = SafetyPolicy::default()
            .with_threshold(HarmCategory::Harassment, HarmBlockThreshold::BlockNone);
        let harassment = &policy.settings()[0];
        assert_eq!(harassment.category, HarmCategory::Harassment);
        assert_eq!(harassment.threshold, HarmBlockThreshold::BlockNone);
        assert_eq!(policy.settings().len(), 4);
        assert_eq!(
            policy.settings()[3].threshold,
            HarmBlockThreshold::BlockMediumAndAbove
        );
    }
}
