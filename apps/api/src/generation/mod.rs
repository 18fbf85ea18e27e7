// Recruitment package generation: job description + interview guide from raw notes.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
