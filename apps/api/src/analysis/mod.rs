// Resume screening and employee sentiment analysis.
// All LLM calls go through the llm_client gateway trait.

pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod samples;
