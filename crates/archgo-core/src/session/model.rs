//! Session data owned by the controller.

use super::phase::Phase;
use crate::analysis::AnalysisResult;
use crate::identity::Identity;

/// A user-selected file held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Input collected on the dashboard; mutable while the session is idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub raw_file: Option<RawFile>,
    /// `data:<mime>;base64,<payload>` preview of `raw_file`.
    pub encoded_preview: Option<String>,
    pub free_text_context: String,
}

impl PendingInput {
    /// True when there is a file or non-blank free text to analyze.
    pub fn is_submittable(&self) -> bool {
        self.raw_file.is_some() || !self.free_text_context.trim().is_empty()
    }
}

/// The single session instance.
///
/// Mutated only through the controller's transitions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub phase: Phase,
    pub identity: Option<Identity>,
    pub pending_input: PendingInput,
    pub last_result: Option<AnalysisResult>,
    pub last_error: Option<String>,
    /// One-way flag: the current result has been saved to the vault.
    pub result_saved: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the dashboard workspace: pending input, result and the saved flag.
    pub fn clear_workspace(&mut self) {
        self.pending_input = PendingInput::default();
        self.last_result = None;
        self.result_saved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_not_submittable() {
        let input = PendingInput {
            free_text_context: "   \n\t".to_string(),
            ..Default::default()
        };
        assert!(!input.is_submittable());
    }

    #[test]
    fn test_file_alone_is_submittable() {
        let input = PendingInput {
            raw_file: Some(RawFile {
                name: "sketch.png".to_string(),
                mime_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };
        assert!(input.is_submittable());
    }

    #[test]
    fn test_new_session_starts_on_landing() {
        let session = Session::new();
        assert_eq!(session.phase, Phase::Landing);
        assert!(session.identity.is_none());
        assert!(!session.result_saved);
    }
}
