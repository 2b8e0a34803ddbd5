//! # AI Symptom Analysis
//!
//! Capability interface around the OpenAI chat API: free-text symptoms
//! in, a structured preliminary assessment out. The trait seam keeps the
//! rest of the app testable with a fake analyzer; transport and parse
//! failures all collapse to one flat user-facing message with no retry
//! and no client-side timeout.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{error, info};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use serde::{Deserialize, Serialize};

/// Flat error surfaced to the user for any analysis failure.
pub const ANALYSIS_FAILED: &str = "Failed to analyze symptoms. Please try again later.";

/// Structured result of one symptom analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub assessment: String,
    pub recommendations: Vec<String>,
    pub cautions: Vec<String>,
    pub disclaimer: String,
}

/// Capability seam for symptom analysis.
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    async fn analyze(&self, symptoms: &str) -> Result<SymptomAnalysis>;
}

/// Live analyzer backed by one ChatCompletion call.
pub struct OpenAiAnalyzer {
    model: String,
    key_configured: bool,
}

impl OpenAiAnalyzer {
    pub fn new(model: String, key_configured: bool) -> Self {
        OpenAiAnalyzer {
            model,
            key_configured,
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a careful medical triage assistant. \
    Analyze the symptoms the user describes and respond with ONLY a JSON object, \
    no prose and no markdown, with exactly these fields: \
    \"assessment\" (string, a professional preliminary assessment), \
    \"recommendations\" (array of strings, practical self-care steps), \
    \"cautions\" (array of strings, red flags that warrant immediate medical attention), \
    \"disclaimer\" (string, a standard medical disclaimer).";

#[async_trait]
impl SymptomAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, symptoms: &str) -> Result<SymptomAnalysis> {
        if !self.key_configured {
            return Err(anyhow!("OPENAI_KEY is not set; symptom analysis is unavailable"));
        }

        info!("analyzing symptoms ({} chars)", symptoms.len());

        let completion = ChatCompletion::builder(
            &self.model,
            vec![
                ChatCompletionMessage {
                    role: ChatCompletionMessageRole::System,
                    content: Some(SYSTEM_PROMPT.to_string()),
                    name: None,
                    function_call: None,
                    tool_call_id: None,
                    tool_calls: None,
                },
                ChatCompletionMessage {
                    role: ChatCompletionMessageRole::User,
                    content: Some(format!("Symptoms: \"{}\"", symptoms)),
                    name: None,
                    function_call: None,
                    tool_call_id: None,
                    tool_calls: None,
                },
            ],
        )
        .create()
        .await
        .map_err(|e| {
            error!("symptom analysis API call failed: {}", e);
            anyhow!(ANALYSIS_FAILED)
        })?;

        let text = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| anyhow!(ANALYSIS_FAILED))?;

        parse_analysis(&text).map_err(|e| {
            error!("symptom analysis response did not parse: {:#}", e);
            anyhow!(ANALYSIS_FAILED)
        })
    }
}

/// Extract a [`SymptomAnalysis`] from model output, tolerating a
/// markdown code fence around the JSON object.
pub fn parse_analysis(text: &str) -> Result<SymptomAnalysis> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();
    serde_json::from_str(body).context("parsing analysis JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{
        "assessment": "Likely tension headache.",
        "recommendations": ["Hydrate", "Rest your eyes"],
        "cautions": ["Sudden severe headache needs urgent care"],
        "disclaimer": "Not medical advice."
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let analysis = parse_analysis(GOOD).unwrap();
        assert_eq!(analysis.assessment, "Likely tension headache.");
        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.cautions.len(), 1);
    }

    #[test]
    fn test_parse_code_fenced_json() {
        let fenced = format!("```json\n{}\n```", GOOD);
        assert!(parse_analysis(&fenced).is_ok());
        let bare_fence = format!("```\n{}\n```", GOOD);
        assert!(parse_analysis(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_rejects_incomplete_object() {
        let missing_field = r#"{"assessment": "x", "recommendations": []}"#;
        assert!(parse_analysis(missing_field).is_err());
        assert!(parse_analysis("I am sorry, I cannot help.").is_err());
    }

    struct FakeAnalyzer {
        fail: bool,
    }

    #[async_trait]
    impl SymptomAnalyzer for FakeAnalyzer {
        async fn analyze(&self, _symptoms: &str) -> Result<SymptomAnalysis> {
            if self.fail {
                return Err(anyhow!(ANALYSIS_FAILED));
            }
            Ok(parse_analysis(GOOD).unwrap())
        }
    }

    #[tokio::test]
    async fn test_fake_analyzer_through_the_trait() {
        let analyzer: Box<dyn SymptomAnalyzer> = Box::new(FakeAnalyzer { fail: false });
        let analysis = analyzer.analyze("dull headache for 2 days").await.unwrap();
        assert!(!analysis.disclaimer.is_empty());

        let failing: Box<dyn SymptomAnalyzer> = Box::new(FakeAnalyzer { fail: true });
        let err = failing.analyze("anything").await.unwrap_err();
        assert_eq!(err.to_string(), ANALYSIS_FAILED);
    }

    #[tokio::test]
    async fn test_live_analyzer_without_key_fails_fast() {
        let analyzer = OpenAiAnalyzer::new("gpt-4o-mini".into(), false);
        assert!(analyzer.analyze("headache").await.is_err());
    }
}
