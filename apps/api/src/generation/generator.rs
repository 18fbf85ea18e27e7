//! Generation Client — turns raw hiring notes into a job description and an interview guide.
//!
//! `AppState` holds an `Arc<dyn AssetGenerator>`; the default backend is
//! `GeminiAssetGenerator`. Tests swap in fakes without any network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::{
    assets_response_schema, build_generation_prompt, GENERATION_SYSTEM, THINKING_BUDGET,
};
use crate::llm_client::{Content, GenerationConfig, LlmClient, LlmError, LlmRequest, ThinkingConfig};

/// The pair of documents produced by one successful generation.
///
/// Missing fields deserialize as empty strings: a response that parses but
/// omits a field degrades to a partially empty result instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAssets {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub interview_guide: String,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned malformed JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AssetGenerator: Send + Sync {
    async fn generate(&self, raw_notes: &str) -> Result<GeneratedAssets, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiAssetGenerator — structured output via generateContent
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiAssetGenerator {
    llm: LlmClient,
    config: GenerationConfig,
}

impl GeminiAssetGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(assets_response_schema()),
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: THINKING_BUDGET,
                }),
            },
        }
    }
}

#[async_trait]
impl AssetGenerator for GeminiAssetGenerator {
    async fn generate(&self, raw_notes: &str) -> Result<GeneratedAssets, GenerationError> {
        let contents = [Content::user(build_generation_prompt(raw_notes))];
        let response = self
            .llm
            .call(LlmRequest {
                system: GENERATION_SYSTEM,
                contents: &contents,
                config: Some(&self.config),
            })
            .await?;

        let text = response.text().unwrap_or_else(|| "{}".to_string());
        let assets = parse_assets(&text)?;
        info!(
            "Generated assets: job_description={} chars, interview_guide={} chars",
            assets.job_description.len(),
            assets.interview_guide.len()
        );
        Ok(assets)
    }
}

/// Parses the model's text payload.
///
/// Unparseable text is an error. Parseable JSON that is not an object, or an
/// object missing fields or carrying non-string values, yields empty fields.
pub fn parse_assets(text: &str) -> Result<GeneratedAssets, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(GenerationError::MalformedBody)?;

    let field = |name: &str| -> String {
        match value.get(name) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => {
                warn!("Generation field {name} is not a string: {other}");
                String::new()
            }
            None => {
                warn!("Generation response is missing {name}");
                String::new()
            }
        }
    };

    Ok(GeneratedAssets {
        job_description: field("jobDescription"),
        interview_guide: field("interviewGuide"),
    })
}
