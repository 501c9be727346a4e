//! Error types for Architect-Go.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The message shown to the user for every backend or response failure.
///
/// The distinguishing detail of the underlying failure is logged, never shown.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze architecture. The model may be overloaded or the input unclear.";

/// A shared error type for the entire Architect-Go workspace.
///
/// Backend and parse failures carry their diagnostic detail in the variant;
/// [`ArchGoError::user_message`] collapses them to a single user-facing string.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ArchGoError {
    /// No file and no text at submit time
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure talking to the generation backend
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered with an empty payload
    #[error("No response from Architect AI.")]
    NoResponse,

    /// JSON parse failure or a required field missing
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Persisted vault data could not be parsed
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An action that the current phase does not accept
    #[error("Cannot {action} while in phase {from}")]
    InvalidTransition { from: String, action: String },

    /// Identity provider failure
    #[error("Identity error: {0}")]
    Identity(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArchGoError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an InvalidTransition error for `action` attempted in phase `from`.
    pub fn invalid_transition(from: impl ToString, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came out of an analysis call (transport or response shape).
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable(_) | Self::NoResponse | Self::MalformedResponse(_)
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the text suitable for showing to the user.
    ///
    /// All analysis failures share [`ANALYSIS_FAILED_MESSAGE`].
    pub fn user_message(&self) -> String {
        if self.is_analysis_failure() {
            ANALYSIS_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ArchGoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ArchGoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ArchGoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ArchGoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ArchGoError>`.
pub type Result<T> = std::result::Result<T, ArchGoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_failures_share_user_message() {
        let errors = [
            ArchGoError::backend_unavailable("503 overloaded"),
            ArchGoError::NoResponse,
            ArchGoError::malformed_response("missing field `dataModel`"),
        ];

        for err in errors {
            assert!(err.is_analysis_failure());
            assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_other_errors_show_their_own_text() {
        let err = ArchGoError::invalid_transition("Idle", "retry");
        assert!(!err.is_analysis_failure());
        assert_eq!(err.user_message(), "Cannot retry while in phase Idle");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ArchGoError = io.into();
        assert!(matches!(err, ArchGoError::Io { .. }));
    }
}
