//! Session orchestration.

mod controller;

pub use controller::SessionController;
