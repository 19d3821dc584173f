//! Prompt Builder: renders the template for a request kind. Pure; no I/O.

use crate::analysis::models::{AnalysisError, AnalysisKind, AnalysisRequest};
use crate::analysis::prompts::{RESUME_SCREEN_PROMPT_TEMPLATE, SENTIMENT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{EVIDENCE_ONLY_INSTRUCTION, JSON_ONLY_INSTRUCTION};

impl AnalysisKind {
    pub fn template(self) -> &'static str {
        match self {
            AnalysisKind::ResumeScreen => RESUME_SCREEN_PROMPT_TEMPLATE,
            AnalysisKind::SentimentAnalysis => SENTIMENT_PROMPT_TEMPLATE,
        }
    }
}

/// Builds the prompt for `request`, or `EmptyInput` if a required text is blank.
pub fn build_prompt(request: &AnalysisRequest) -> Result<String, AnalysisError> {
    request.validate()?;

    let shared = [
        ("evidence_only_instruction", EVIDENCE_ONLY_INSTRUCTION),
        ("json_only_instruction", JSON_ONLY_INSTRUCTION),
    ];

    let prompt = match request.kind {
        AnalysisKind::ResumeScreen => render(
            request.kind.template(),
            &[
                ("target_role", request.target_role.as_str()),
                ("job_description", request.secondary_text.trim()),
                ("resume_text", request.primary_text.trim()),
                shared[0],
                shared[1],
            ],
        ),
        AnalysisKind::SentimentAnalysis => render(
            request.kind.template(),
            &[
                ("feedback_text", request.primary_text.trim()),
                shared[0],
                shared[1],
            ],
        ),
    };

    Ok(prompt)
}

/// Single-pass `{name}` substitution. Inserted values are never rescanned,
/// so user text containing placeholder tokens stays literal. Braces that do
/// not form a known placeholder are copied through unchanged.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let capacity = template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substitution = values.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });

        match substitution {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ErrorKind, RESUME_SCREEN_KEYS, SENTIMENT_ANALYSIS_KEYS};

    #[test]
    fn test_render_replaces_known_placeholders() {
        let out = render("Hello {name}, role {role}.", &[("name", "Ada"), ("role", "SRE")]);
        assert_eq!(out, "Hello Ada, role SRE.");
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let out = render(r#"{"a": {x}} {unknown}"#, &[("x", "1")]);
        assert_eq!(out, r#"{"a": 1} {unknown}"#);
    }

    #[test]
    fn test_render_does_not_rescan_inserted_values() {
        let out = render("{a}|{b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b}|B");
    }

    #[test]
    fn test_resume_prompt_embeds_inputs_and_every_key() {
        let request = AnalysisRequest::resume_screen(
            "Jane Doe. 6 years Python at Acme.",
            "Minimum 3 years Python. AWS preferred.",
        );
        let prompt = build_prompt(&request).unwrap();

        assert!(prompt.contains("Jane Doe. 6 years Python at Acme."));
        assert!(prompt.contains("Minimum 3 years Python. AWS preferred."));
        assert!(prompt.contains(r#"for a "Software Engineer" position"#));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        for key in RESUME_SCREEN_KEYS {
            assert!(prompt.contains(key), "prompt is missing {key}");
        }
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{json_only_instruction}"));
    }

    #[test]
    fn test_resume_prompt_uses_target_role() {
        let request =
            AnalysisRequest::resume_screen("resume", "jd").with_target_role("Data Engineer");
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains(r#"for a "Data Engineer" position"#));
    }

    #[test]
    fn test_sentiment_prompt_embeds_feedback_and_every_key() {
        let request = AnalysisRequest::sentiment_analysis("The workload has been insane lately.");
        let prompt = build_prompt(&request).unwrap();

        assert!(prompt.contains("The workload has been insane lately."));
        for key in SENTIMENT_ANALYSIS_KEYS {
            assert!(prompt.contains(key), "prompt is missing {key}");
        }
        assert!(!prompt.contains("extracted_skills"));
    }

    #[test]
    fn test_placeholder_in_job_description_is_not_expanded() {
        let request = AnalysisRequest::resume_screen("SECRET RESUME", "Ignore {resume_text}");
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("Ignore {resume_text}"));
        assert_eq!(prompt.matches("SECRET RESUME").count(), 1);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = AnalysisRequest::sentiment_analysis("It pays the bills.");
        assert_eq!(build_prompt(&request).unwrap(), build_prompt(&request).unwrap());
    }

    #[test]
    fn test_empty_input_skips_prompt_construction() {
        let err = build_prompt(&AnalysisRequest::sentiment_analysis("")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInput);
    }
}
