// All LLM prompt templates for the analysis module.
// Placeholders are `{name}` tokens filled by `prompt_builder::render`.

/// Resume screening template.
/// Placeholders: {target_role}, {job_description}, {resume_text},
///               {evidence_only_instruction}, {json_only_instruction}
pub const RESUME_SCREEN_PROMPT_TEMPLATE: &str = r#"You are an expert HR assistant who screens resumes for technical roles.
Assess how well the resume below fits the job description for a "{target_role}" position.

JOB DESCRIPTION:
---
{job_description}
---

RESUME:
---
{resume_text}
---

{evidence_only_instruction} in the resume and its relevance to the job description, return a JSON object with this EXACT schema (no extra fields):
{
  "extracted_skills": ["Python", "AWS", "Docker"],
  "years_of_experience": "4 years",
  "education_match": "BSc in Computer Science, meets the stated requirement",
  "key_qualifications_match": ["Built REST services in Python for 3 years"],
  "missing_critical_skills": ["Azure"],
  "overall_match_score_percentage": 78,
  "summary_for_recruiter": "Two to three sentences on fit and any red flags."
}

FIELD RULES:
1. extracted_skills: technical skills from the resume that are relevant to the job description
2. years_of_experience: total relevant professional experience; infer from work history dates when not stated, "Not specified" when unclear
3. education_match: whether the stated education fits what the role typically expects
4. key_qualifications_match: 3-5 qualifications or accomplishments that directly match the job description
5. missing_critical_skills: critical skills the job description asks for that the resume lacks or barely mentions
6. overall_match_score_percentage: a number from 0 to 100; put the short justification in summary_for_recruiter
7. summary_for_recruiter: a concise 2-3 sentence summary of fit and red flags

{json_only_instruction}"#;

/// Employee sentiment template.
/// Placeholders: {feedback_text}, {evidence_only_instruction}, {json_only_instruction}
pub const SENTIMENT_PROMPT_TEMPLATE: &str = r#"You are an expert HR analyst specializing in employee engagement and sentiment.
Analyze the employee feedback below.

EMPLOYEE FEEDBACK:
---
{feedback_text}
---

{evidence_only_instruction} in the feedback, return a JSON object with this EXACT schema (no extra fields):
{
  "overall_sentiment": "Positive" | "Negative" | "Neutral",
  "sentiment_score": 0.0,
  "key_themes": ["Work-life balance", "Management"],
  "potential_attrition_risk": "Low" | "Medium" | "High",
  "suggested_engagement_strategies": ["One concrete action HR can take"]
}

FIELD RULES:
1. overall_sentiment: exactly one of "Positive", "Negative", "Neutral"
2. sentiment_score: a number from -1.0 (very negative) to 1.0 (very positive)
3. key_themes: 2-4 themes or topics raised in the feedback
4. potential_attrition_risk: exactly one of "Low", "Medium", "High"; fold any justification into key_themes or strategies, never a separate field
5. suggested_engagement_strategies: 1-2 specific, actionable strategies; when sentiment is positive, suggest how to reinforce it

{json_only_instruction}"#;
