//! Identity provider capability.

use super::model::{Identity, LoginRequest};
use crate::error::Result;
use async_trait::async_trait;

/// Resolves a login request into an [`Identity`].
///
/// The session depends only on this trait, so a real OAuth or SAML client can
/// replace the bundled stub without touching the controller.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<Identity>;
}
