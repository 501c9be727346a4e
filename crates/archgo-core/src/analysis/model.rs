//! AnalysisResult domain model.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Deserializer, Serialize};

/// The structured output of one architecture-analysis request.
///
/// Immutable once produced. Every field is required on the wire; a payload
/// missing any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Viability score, 0 to 100.
    #[serde(deserialize_with = "deserialize_score")]
    pub viability_score: u8,
    pub viability_analysis: String,
    /// Recommended remediation / roadmap.
    #[serde(rename = "strategy2026")]
    pub strategy_2026: String,
    /// Generated schema source.
    pub data_model: String,
    /// Generated server logic source.
    pub backend_impl: String,
    /// Markdown security policy with at least one fenced rules block.
    pub security_context: String,
}

/// Coarse grading of a viability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ViabilityBand {
    High,
    Moderate,
    Low,
}

impl AnalysisResult {
    pub fn viability_band(&self) -> ViabilityBand {
        match self.viability_score {
            80..=u8::MAX => ViabilityBand::High,
            50..=79 => ViabilityBand::Moderate,
            _ => ViabilityBand::Low,
        }
    }

    /// Returns the contents of every fenced code block in the security context.
    ///
    /// These are the security rules a user copies out of the report.
    pub fn security_rules(&self) -> Vec<String> {
        let mut rules = Vec::new();
        let mut current: Option<String> = None;

        for event in Parser::new(&self.security_context) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                    current = Some(String::new());
                }
                Event::Text(text) => {
                    if let Some(block) = current.as_mut() {
                        block.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = current.take() {
                        rules.push(block.trim_end_matches('\n').to_string());
                    }
                }
                _ => {}
            }
        }

        rules
    }
}

/// Accepts any JSON number and clamps it into 0..=100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("viabilityScore must be a finite number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
pub(crate) fn sample_result() -> AnalysisResult {
    AnalysisResult {
        viability_score: 42,
        viability_analysis: "Client talks straight to the database.".to_string(),
        strategy_2026: "Introduce an API gateway and auth middleware.".to_string(),
        data_model: "export interface User { id: string }".to_string(),
        backend_impl: "const app = initializeApp();\nfunction createUser() {}".to_string(),
        security_context: "### Rules\n\n```\nallow read: if request.auth != null;\n```\n"
            .to_string(),
    }
}
