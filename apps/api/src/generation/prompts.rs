// All LLM prompt constants for the Generation module.

use serde_json::{json, Value};

/// System instruction for the job description + interview guide call.
pub const GENERATION_SYSTEM: &str = "You are a world-class HR consultant and technical recruiter. \
    Create a polished LinkedIn-ready Job Description and a 10-question behavioral interview guide \
    based on messy notes. Use clear headings and bullet points.";

/// User content template. Replace `{raw_notes}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = "Raw hiring notes: {raw_notes}";

/// Thinking budget hint forwarded to the model. Does not change the output contract.
pub const THINKING_BUDGET: u32 = 32768;

pub fn build_generation_prompt(raw_notes: &str) -> String {
    GENERATION_PROMPT_TEMPLATE.replace("{raw_notes}", raw_notes)
}

/// Structured-output schema: an object with exactly two required string fields.
pub fn assets_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "jobDescription": {
                "type": "STRING",
                "description": "A polished LinkedIn Job Description formatted in Markdown."
            },
            "interviewGuide": {
                "type": "STRING",
                "description": "An Interview Guide with 10 behavioral questions targeting soft/hard skills in Markdown."
            }
        },
        "required": ["jobDescription", "interviewGuide"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_notes_verbatim() {
        let notes = "Senior Rust dev, remote ok, {braces} kept";
        assert_eq!(
            build_generation_prompt(notes),
            "Raw hiring notes: Senior Rust dev, remote ok, {braces} kept"
        );
    }

    #[test]
    fn test_schema_requires_both_fields() {
        let schema = assets_response_schema();
        assert_eq!(schema["required"], json!(["jobDescription", "interviewGuide"]));
        assert_eq!(schema["properties"]["jobDescription"]["type"], "STRING");
        assert_eq!(schema["properties"]["interviewGuide"]["type"], "STRING");
    }
}
