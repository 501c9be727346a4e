//! Analysis domain module.
//!
//! - `model`: the AnalysisResult produced by the backend
//! - `request`: the wire-neutral multimodal request
//! - `backend`: the capability trait implemented by generation clients

mod backend;
mod model;
mod request;

pub use backend::AnalysisBackend;
pub use model::{AnalysisResult, ViabilityBand};
pub use request::{AnalysisRequest, InlineMedia, RequestPart};

#[cfg(test)]
pub(crate) use model::sample_result;
