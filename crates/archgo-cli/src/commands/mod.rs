pub mod analyze;
pub mod playback;
pub mod shell;
pub mod vault;
