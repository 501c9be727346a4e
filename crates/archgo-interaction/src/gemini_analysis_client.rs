//! GeminiAnalysisClient - Analysis Client over the Gemini REST API.
//!
//! Sends one `generateContent` call per analysis with a response schema that
//! requires all six AnalysisResult fields.

use crate::prompts::SYSTEM_INSTRUCTION;
use archgo_core::analysis::{AnalysisBackend, AnalysisRequest, AnalysisResult, RequestPart};
use archgo_core::config::{AnalysisSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use archgo_core::{ArchGoError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const DEFAULT_THINKING_BUDGET: u32 = 16384;

/// Analysis backend that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiAnalysisClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    thinking_budget: u32,
}

impl GeminiAnalysisClient {
    /// Creates a client with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }

    /// Creates a client from `[analysis]` settings.
    pub fn from_settings(settings: &AnalysisSettings, api_key: impl Into<String>) -> Self {
        Self::new(api_key)
            .with_model(settings.model.clone())
            .with_base_url(settings.base_url.clone())
            .with_thinking_budget(settings.thinking_budget)
    }

    /// Replaces the underlying HTTP client (proxies, timeouts, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = budget;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &AnalysisRequest) -> GenerateContentRequest {
        let parts = request
            .parts()
            .into_iter()
            .map(|part| match part {
                RequestPart::InlineData(media) => Part::InlineData {
                    inline_data: InlineDataPayload {
                        mime_type: media.mime_type,
                        data: media.data,
                    },
                },
                RequestPart::Text(text) => Part::Text { text },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                ArchGoError::backend_unavailable(format!("Gemini API request failed: {err}"))
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|err| {
            ArchGoError::backend_unavailable(format!("Failed to read Gemini response: {err}"))
        })?;

        if !status.is_success() {
            return Err(map_http_error(status, &body_text));
        }

        Ok(body_text)
    }
}

#[async_trait]
impl AnalysisBackend for GeminiAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let body = self.build_body(request);
        tracing::info!(
            "[Gemini] Requesting analysis from {} (media: {})",
            self.model,
            request.media().is_some()
        );

        let outcome = match self.send_request(&body).await {
            Ok(text) => parse_generate_response(&text),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            tracing::error!("[Gemini] Architect AI error: {}", e);
        }
        outcome
    }
}

/// Parses a raw `generateContent` response body into an [`AnalysisResult`].
///
/// - an unreadable envelope is `BackendUnavailable`
/// - no candidate text, or blank text, is `NoResponse`
/// - text that is not a complete AnalysisResult is `MalformedResponse`
pub fn parse_generate_response(body: &str) -> Result<AnalysisResult> {
    let envelope: GenerateContentResponse = serde_json::from_str(body).map_err(|err| {
        ArchGoError::backend_unavailable(format!("Failed to parse Gemini response: {err}"))
    })?;

    let text = envelope
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought.unwrap_or(false))
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ArchGoError::NoResponse);
    }

    serde_json::from_str(&text).map_err(|err| ArchGoError::malformed_response(err.to_string()))
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "viabilityScore": { "type": "NUMBER" },
            "viabilityAnalysis": { "type": "STRING" },
            "strategy2026": { "type": "STRING" },
            "dataModel": { "type": "STRING" },
            "backendImpl": { "type": "STRING" },
            "securityContext": { "type": "STRING" }
        },
        "required": [
            "viabilityScore",
            "viabilityAnalysis",
            "strategy2026",
            "dataModel",
            "backendImpl",
            "securityContext"
        ]
    })
}

fn map_http_error(status: StatusCode, body: &str) -> ArchGoError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    ArchGoError::backend_unavailable(format!("HTTP {}: {}", status.as_u16(), message))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    thought: Option<bool>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgo_core::analysis::InlineMedia;

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        })
        .to_string()
    }

    fn result_json() -> String {
        json!({
            "viabilityScore": 35,
            "viabilityAnalysis": "Direct DB access from the client.",
            "strategy2026": "Add a gateway.",
            "dataModel": "export interface User { id: string }",
            "backendImpl": "export const createUser = functions.https.onCall(() => {});",
            "securityContext": "### Rules\n```\nallow read: if request.auth != null;\n```"
        })
        .to_string()
    }

    #[test]
    fn test_parses_candidate_text() {
        let result = parse_generate_response(&envelope(&result_json())).unwrap();
        assert_eq!(result.viability_score, 35);
        assert_eq!(result.strategy_2026, "Add a gateway.");
    }

    #[test]
    fn test_thought_parts_are_skipped() {
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "thinking about it", "thought": true },
                { "text": result_json() }
            ] } }]
        })
        .to_string();

        assert!(parse_generate_response(&body).is_ok());
    }

    #[test]
    fn test_empty_text_is_no_response() {
        let err = parse_generate_response(&envelope("")).unwrap_err();
        assert!(matches!(err, ArchGoError::NoResponse));

        let err = parse_generate_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ArchGoError::NoResponse));

        let err = parse_generate_response("{}").unwrap_err();
        assert!(matches!(err, ArchGoError::NoResponse));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let partial = json!({ "viabilityScore": 10, "viabilityAnalysis": "x" }).to_string();
        let err = parse_generate_response(&envelope(&partial)).unwrap_err();
        assert!(matches!(err, ArchGoError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_text_is_malformed() {
        let err = parse_generate_response(&envelope("Sure! Here is your design")).unwrap_err();
        assert!(matches!(err, ArchGoError::MalformedResponse(_)));
    }

    #[test]
    fn test_garbage_envelope_is_backend_failure() {
        let err = parse_generate_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ArchGoError::BackendUnavailable(_)));
    }

    #[test]
    fn test_http_error_message_is_extracted() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(
            err.to_string(),
            "Backend unavailable: HTTP 503: UNAVAILABLE: The model is overloaded."
        );
    }

    #[test]
    fn test_body_carries_schema_and_media() {
        let client = GeminiAnalysisClient::new("key").with_thinking_budget(1024);
        let request = AnalysisRequest::new(
            Some(InlineMedia {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            }),
            "describe",
        );

        let body = serde_json::to_value(client.build_body(&request)).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], "describe");

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["thinkingConfig"]["thinkingBudget"], 1024);
        assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 6);
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Architect-Go")
        );
    }
}
