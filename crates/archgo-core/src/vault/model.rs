//! VaultEntry domain model and title derivation.

use crate::analysis::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of free text kept in a derived title before the ellipsis.
pub const TITLE_LIMIT: usize = 25;

/// Title used when there is no free text to derive one from.
pub const FALLBACK_TITLE: &str = "Generated Architecture";

/// A saved analysis result. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    pub id: String,
    pub title: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    #[serde(rename = "data")]
    pub result: AnalysisResult,
}

impl VaultEntry {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}

/// Derives a vault title from the user's free-text context.
///
/// Newlines become spaces. Text longer than [`TITLE_LIMIT`] characters is cut
/// and suffixed with `...`.
pub fn derive_title(context: &str) -> String {
    if context.trim().is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    let truncated = context.chars().count() > TITLE_LIMIT;
    let head: String = context
        .chars()
        .take(TITLE_LIMIT)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    let mut title = head.trim().to_string();
    if truncated {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_is_verbatim() {
        assert_eq!(derive_title("Payments platform"), "Payments platform");
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let text = "a".repeat(TITLE_LIMIT);
        assert_eq!(derive_title(&text), text);
    }

    #[test]
    fn test_long_title_is_truncated_with_ellipsis() {
        let title = derive_title("A ride sharing backend with surge pricing and payouts");
        assert_eq!(title, "A ride sharing backend wi...");
        assert!(title.chars().count() <= TITLE_LIMIT + 3);
    }

    #[test]
    fn test_newlines_are_stripped() {
        assert_eq!(derive_title("Orders\nInventory"), "Orders Inventory");
    }

    #[test]
    fn test_empty_context_uses_fallback() {
        assert_eq!(derive_title(""), FALLBACK_TITLE);
        assert_eq!(derive_title("  \n "), FALLBACK_TITLE);
    }

    #[test]
    fn test_multibyte_text_is_cut_on_char_boundary() {
        let title = derive_title(&"é".repeat(30));
        assert_eq!(title, format!("{}...", "é".repeat(TITLE_LIMIT)));
    }
}
