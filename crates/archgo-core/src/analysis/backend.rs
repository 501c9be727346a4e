//! Analysis backend capability.

use super::model::AnalysisResult;
use super::request::AnalysisRequest;
use crate::error::Result;
use async_trait::async_trait;

/// An external generation backend that turns a request into an [`AnalysisResult`].
///
/// Implementations map transport failures to `BackendUnavailable`, an empty
/// payload to `NoResponse` and shape violations to `MalformedResponse`.
/// No retries are attempted.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}
