//! Domain core of Architect-Go.
//!
//! Models, capability traits and pure logic shared by every other crate. Nothing
//! here performs network or file IO directly.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod playback;
pub mod session;
pub mod storage;
pub mod vault;

// Re-export common error type
pub use error::{ArchGoError, Result};
