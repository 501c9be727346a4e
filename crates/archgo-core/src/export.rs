//! Security report export artifact.

use crate::analysis::AnalysisResult;
use chrono::{DateTime, Utc};

pub const REPORT_MIME_TYPE: &str = "text/markdown";

/// A downloadable file holding the verbatim security context of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityReport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl SecurityReport {
    pub fn from_result(result: &AnalysisResult, now: DateTime<Utc>) -> Self {
        Self {
            file_name: format!("security-audit-{}.md", now.timestamp_millis()),
            mime_type: REPORT_MIME_TYPE,
            content: result.security_context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample_result;

    #[test]
    fn test_report_is_verbatim_with_timestamped_name() {
        let result = sample_result();
        let now = DateTime::from_timestamp_millis(1_760_000_000_123).unwrap();
        let report = SecurityReport::from_result(&result, now);

        assert_eq!(report.file_name, "security-audit-1760000000123.md");
        assert_eq!(report.mime_type, "text/markdown");
        assert_eq!(report.content, result.security_context);
    }
}
