//! Session phase.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The named state of the session state machine. Initial phase is `Landing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum Phase {
    #[default]
    Landing,
    Login,
    Idle,
    Analyzing,
    Result,
    Error,
}
