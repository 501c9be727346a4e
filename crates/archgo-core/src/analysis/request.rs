//! Wire-neutral analysis request.

use serde::{Deserialize, Serialize};

/// Inline media attached to a request: a MIME type plus the raw base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineMedia {
    pub mime_type: String,
    pub data: String,
}

/// A single part of a multimodal request, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    InlineData(InlineMedia),
    Text(String),
}

/// A fully formed analysis request.
///
/// Holds at most one inline media part and exactly one text instruction part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    media: Option<InlineMedia>,
    instruction: String,
}

impl AnalysisRequest {
    pub fn new(media: Option<InlineMedia>, instruction: impl Into<String>) -> Self {
        Self {
            media,
            instruction: instruction.into(),
        }
    }

    pub fn media(&self) -> Option<&InlineMedia> {
        self.media.as_ref()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the parts in send order: media first (if any), then the text.
    pub fn parts(&self) -> Vec<RequestPart> {
        let mut parts = Vec::with_capacity(2);
        if let Some(media) = &self.media {
            parts.push(RequestPart::InlineData(media.clone()));
        }
        parts.push(RequestPart::Text(self.instruction.clone()));
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_order_media_before_text() {
        let media = InlineMedia {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };
        let request = AnalysisRequest::new(Some(media.clone()), "analyze");

        assert_eq!(
            request.parts(),
            vec![
                RequestPart::InlineData(media),
                RequestPart::Text("analyze".to_string())
            ]
        );
    }

    #[test]
    fn test_text_only_request_has_single_part() {
        let request = AnalysisRequest::new(None, "analyze");
        assert_eq!(request.parts().len(), 1);
        assert!(request.media().is_none());
    }
}
