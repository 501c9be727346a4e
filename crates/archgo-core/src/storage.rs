//! Key-value persistence capability.
//!
//! The vault is addressed by one fixed namespace key inside a store that
//! implements this trait. Implementations live in `archgo-infrastructure`.

use crate::error::Result;

/// A synchronous string key-value store.
///
/// Single-writer: callers never drive the same store from two sessions.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
