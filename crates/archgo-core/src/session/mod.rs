//! Session domain module.
//!
//! The state machine driving these types lives in `archgo-application`.

mod model;
mod phase;

pub use model::{PendingInput, RawFile, Session};
pub use phase::Phase;
