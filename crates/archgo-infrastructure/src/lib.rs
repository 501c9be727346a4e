//! Filesystem and stub collaborators for Architect-Go.

pub mod attachment;
pub mod config_service;
pub mod identity_service;
pub mod paths;
pub mod report_exporter;
pub mod storage;

pub use config_service::ConfigService;
pub use identity_service::MockIdentityProvider;
pub use storage::{JsonFileStore, MemoryStore};
