//! Identity domain module.

mod model;
mod provider;

pub use model::{Identity, LoginRequest, Role};
pub use provider::IdentityProvider;
