//! Log playback domain module: scenarios, scripts and emitted events.

mod model;
mod script;

pub use model::{LogEvent, LogSeverity, Scenario};
pub use script::{MAX_SYMBOLS, ScriptLine, build_script, discover_symbols};
