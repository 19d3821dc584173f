// Shared prompt fragments used by every analysis template.
// Each domain module keeps its own prompts.rs alongside it.

/// Closing instruction appended to every analysis prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Output *only* the JSON object. \
    Do not include any other explanatory text before or after the JSON.";

/// Grounding rule shared by the analysis templates.
pub const EVIDENCE_ONLY_INSTRUCTION: &str = "Based *only* on the information provided";
