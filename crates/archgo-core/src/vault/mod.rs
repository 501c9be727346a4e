//! Vault domain module: saved analysis results.

mod model;
mod store;

pub use model::{FALLBACK_TITLE, TITLE_LIMIT, VaultEntry, derive_title};
pub use store::{VAULT_KEY, VaultStore};
