//! Application layer for Architect-Go.
//!
//! This crate drives the session state machine and the log playback engine,
//! coordinating the domain types in `archgo-core` with an analysis backend, an
//! identity provider and the vault.

pub mod playback_scheduler;
pub mod session;

pub use playback_scheduler::{LogPlaybackScheduler, PlaybackRun};
pub use session::SessionController;
