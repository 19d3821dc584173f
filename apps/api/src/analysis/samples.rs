//! Sample inputs offered to the front end: a default job description and
//! example feedback texts for each sentiment.

use serde::Serialize;

pub const DEFAULT_JOB_DESCRIPTION: &str = "\
Job Title: Software Engineer

We are looking for a passionate Software Engineer to design, develop, and install software solutions.
The successful candidate will be able to build high-quality, innovative, and fully performing software
in compliance with coding standards and technical design.

Requirements:
- Minimum 3 years of experience in software development using Python or Java.
- Experience with cloud platforms like AWS or Azure.
- BSc degree in Computer Science or relevant field.";

pub const FEEDBACK_EXAMPLES: [(&str, &str); 3] = [
    (
        "Positive Example",
        "I love working here! My team is fantastic, and I feel challenged and supported. \
         The recent training on new technologies was excellent, and I see clear paths for growth.",
    ),
    (
        "Negative Example",
        "The workload has been insane lately, and I don't feel like management is listening to \
         our concerns. I'm seriously considering looking for other opportunities if things don't change.",
    ),
    (
        "Neutral Example",
        "The job is fine. It pays the bills. Some days are good, some are okay.",
    ),
];

#[derive(Debug, Serialize)]
pub struct FeedbackExample {
    pub label: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SamplesResponse {
    pub default_job_description: &'static str,
    pub feedback_examples: Vec<FeedbackExample>,
}

pub fn samples() -> SamplesResponse {
    SamplesResponse {
        default_job_description: DEFAULT_JOB_DESCRIPTION,
        feedback_examples: FEEDBACK_EXAMPLES
            .iter()
            .map(|&(label, text)| FeedbackExample { label, text })
            .collect(),
    }
}
