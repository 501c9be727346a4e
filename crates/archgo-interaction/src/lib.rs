//! Request construction and the generation backend client.

pub mod gemini_analysis_client;
pub mod prompts;
pub mod request_builder;

pub use gemini_analysis_client::GeminiAnalysisClient;
pub use request_builder::{build_request, parse_data_uri};
