//! Analysis Request Builder.
//!
//! Turns the session's pending input into an [`AnalysisRequest`] without any
//! network access.

use crate::prompts::analysis_instruction;
use archgo_core::analysis::{AnalysisRequest, InlineMedia};
use archgo_core::{ArchGoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type assumed when a preview carries no `data:` header.
pub const DEFAULT_MEDIA_MIME: &str = "image/png";

static DATA_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(.+);base64,(.+)$").expect("data uri pattern is valid"));

static IMAGE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/\w+;base64,").expect("image prefix pattern is valid"));

/// Builds a request from an optional `data:` URI preview and free text.
///
/// At least one of the two must be non-empty.
pub fn build_request(
    preview_data_uri: Option<&str>,
    text_context: &str,
) -> Result<AnalysisRequest> {
    let preview = preview_data_uri.filter(|uri| !uri.trim().is_empty());

    if preview.is_none() && text_context.trim().is_empty() {
        return Err(ArchGoError::invalid_input(
            "an image or a text description is required",
        ));
    }

    let media = preview.map(parse_data_uri);
    Ok(AnalysisRequest::new(media, analysis_instruction(text_context)))
}

/// Splits a `data:<mime>;base64,<payload>` URI into MIME type and payload.
///
/// Without the header the MIME type defaults to [`DEFAULT_MEDIA_MIME`] and any
/// stray image prefix is stripped from the payload.
pub fn parse_data_uri(uri: &str) -> InlineMedia {
    if let Some(caps) = DATA_URI.captures(uri) {
        return InlineMedia {
            mime_type: caps[1].to_string(),
            data: caps[2].to_string(),
        };
    }

    InlineMedia {
        mime_type: DEFAULT_MEDIA_MIME.to_string(),
        data: IMAGE_PREFIX.replace(uri, "").into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgo_core::analysis::RequestPart;

    #[test]
    fn test_data_uri_is_split() {
        let media = parse_data_uri("data:image/png;base64,AAAA");
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.data, "AAAA");
    }

    #[test]
    fn test_non_image_mime_is_kept() {
        let media = parse_data_uri("data:application/json;base64,e30=");
        assert_eq!(media.mime_type, "application/json");
        assert_eq!(media.data, "e30=");
    }

    #[test]
    fn test_raw_payload_defaults_mime() {
        let media = parse_data_uri("iVBORw0KGgo");
        assert_eq!(media.mime_type, DEFAULT_MEDIA_MIME);
        assert_eq!(media.data, "iVBORw0KGgo");
    }

    #[test]
    fn test_build_with_image_and_text() {
        let request = build_request(Some("data:image/jpeg;base64,/9j/"), "checkout flow").unwrap();
        let parts = request.parts();

        assert_eq!(parts.len(), 2);
        match &parts[0] {
            RequestPart::InlineData(media) => {
                assert_eq!(media.mime_type, "image/jpeg");
                assert_eq!(media.data, "/9j/");
            }
            other => panic!("expected inline data first, got {other:?}"),
        }
        match &parts[1] {
            RequestPart::Text(text) => assert!(text.contains("checkout flow")),
            other => panic!("expected text second, got {other:?}"),
        }
    }

    #[test]
    fn test_build_text_only() {
        let request = build_request(None, "a todo app").unwrap();
        assert!(request.media().is_none());
        assert_eq!(request.parts().len(), 1);
    }

    #[test]
    fn test_build_image_only_has_text_part() {
        let request = build_request(Some("data:image/png;base64,AAAA"), "").unwrap();
        assert_eq!(request.parts().len(), 2);
        assert!(request.instruction().contains("User Context: \"\""));
    }

    #[test]
    fn test_build_rejects_empty_input() {
        let err = build_request(None, "   ").unwrap_err();
        assert!(matches!(err, ArchGoError::InvalidInput(_)));

        let err = build_request(Some(""), "").unwrap_err();
        assert!(matches!(err, ArchGoError::InvalidInput(_)));
    }
}
