//! Identity domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role selected at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[default]
    Architect,
    Engineer,
}

/// An authenticated-user record held by the session.
///
/// Produced by an [`IdentityProvider`](super::IdentityProvider); the bundled
/// provider is a stub and this is not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar image reference (URL).
    pub avatar: String,
    pub role: Role,
}

/// What the user typed on the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub display_name: String,
    pub role: Role,
}

impl LoginRequest {
    pub fn new(display_name: impl Into<String>, role: Role) -> Self {
        Self {
            display_name: display_name.into(),
            role,
        }
    }
}
