//! Response Normalizer: turns raw model text into a JSON result.
//!
//! Models wrap JSON three ways: not at all, in a bare ``` fence, or in a
//! ```json fence. The text is classified first, then the payload between the
//! opener and the *last* closing fence is located by search. A missing
//! closing fence is tolerated. Every failure returns `MalformedJson` with
//! the untouched raw text attached.

use serde_json::Value;

use crate::analysis::models::{AnalysisError, AnalysisKind, AnalysisResult};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceStyle {
    Unfenced,
    BareFenced,
    JsonTagged,
}

impl FenceStyle {
    /// Classifies already-trimmed text by its opening marker.
    pub fn classify(text: &str) -> Self {
        match text.strip_prefix(FENCE) {
            None => FenceStyle::Unfenced,
            Some(rest) if has_json_tag(rest) => FenceStyle::JsonTagged,
            Some(_) => FenceStyle::BareFenced,
        }
    }
}

/// True when `rest` opens with a standalone `json` tag. Longer tags such as
/// `jsonl` or `json5` are left to the bare-fence info-string handling.
fn has_json_tag(rest: &str) -> bool {
    let Some(tag) = rest.get(..JSON_TAG.len()) else {
        return false;
    };
    tag.eq_ignore_ascii_case(JSON_TAG)
        && rest[JSON_TAG.len()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '{' || c == '[')
}

/// Returns the JSON payload inside `text` for the given style.
pub fn extract_payload(text: &str, style: FenceStyle) -> &str {
    let text = text.trim();
    let body = match style {
        FenceStyle::Unfenced => return text,
        FenceStyle::JsonTagged => &text[FENCE.len() + JSON_TAG.len()..],
        FenceStyle::BareFenced => skip_info_string(&text[FENCE.len()..]),
    };

    let body = match body.rfind(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    body.trim()
}

/// Drops a language tag such as `javascript` that follows a bare opener
/// on its own line. Anything else after the opener is payload.
fn skip_info_string(rest: &str) -> &str {
    match rest.split_once('\n') {
        Some((info, tail))
            if info
                .trim()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            tail
        }
        _ => rest,
    }
}

/// Strips any fence from `raw` and parses the remainder as JSON.
pub fn normalize(raw: &str) -> Result<Value, AnalysisError> {
    let trimmed = raw.trim();
    let style = FenceStyle::classify(trimmed);
    let payload = extract_payload(trimmed, style);

    serde_json::from_str(payload).map_err(|e| AnalysisError::malformed_json(e.to_string(), raw))
}

/// Normalizes `raw` and checks it is an object carrying every key `kind` requires.
pub fn normalize_result(raw: &str, kind: AnalysisKind) -> Result<AnalysisResult, AnalysisError> {
    let Value::Object(result) = normalize(raw)? else {
        return Err(AnalysisError::malformed_json(
            "expected a JSON object",
            raw,
        ));
    };

    let missing: Vec<&str> = kind
        .required_keys()
        .iter()
        .copied()
        .filter(|key| !result.contains_key(*key))
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::malformed_json(
            format!("response is missing required keys: {}", missing.join(", ")),
            raw,
        ));
    }

    Ok(result)
}
