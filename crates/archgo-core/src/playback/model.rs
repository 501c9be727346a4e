//! Log playback domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// A scripted terminal scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scenario {
    /// Pretend to compile and run the generated backend.
    Simulate,
    /// Pretend to attach a debugger to the generated backend.
    Debug,
}

impl Scenario {
    /// The final line of the scenario; emitting it ends the run.
    pub fn completion_marker(&self) -> &'static str {
        match self {
            Scenario::Simulate => ">>> SIMULATION SEQUENCE COMPLETED <<<",
            Scenario::Debug => ">>> DEBUG SESSION DISCONNECTED <<<",
        }
    }
}

/// One emitted terminal line. Display only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    /// `HH:MM:SS.mmm`, taken at the moment of emission.
    pub timestamp: String,
    pub message: String,
}

impl LogEvent {
    /// Stamps `message` with the current UTC wall-clock time.
    pub fn now(message: impl Into<String>) -> Self {
        Self::at(Utc::now(), message)
    }

    pub fn at(time: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp: time.format("%H:%M:%S%.3f").to_string(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> LogSeverity {
        LogSeverity::classify(&self.message)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// Visual class of a terminal line, checked in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    Error,
    Success,
    Warning,
    Banner,
    Compiler,
    Step,
    Debugger,
    Plain,
}

impl LogSeverity {
    pub fn classify(message: &str) -> Self {
        if message.contains("ERROR") || message.contains("Failed") {
            LogSeverity::Error
        } else if message.contains("SUCCESS") {
            LogSeverity::Success
        } else if message.contains("WARNING") {
            LogSeverity::Warning
        } else if message.contains(">>>") {
            LogSeverity::Banner
        } else if message.contains("[Compiler]") {
            LogSeverity::Compiler
        } else if message.contains("Step") {
            LogSeverity::Step
        } else if message.contains("Debugger") {
            LogSeverity::Debugger
        } else {
            LogSeverity::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_timestamp_format() {
        let time = Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        let event = LogEvent::at(time, "hello");
        assert_eq!(event.timestamp, "09:05:07.042");
        assert_eq!(event.to_string(), "[09:05:07.042] hello");
    }

    #[test]
    fn test_severity_priority() {
        assert_eq!(LogSeverity::classify("Build Failed >>>"), LogSeverity::Error);
        assert_eq!(
            LogSeverity::classify("SUCCESS: Backend logic deployed"),
            LogSeverity::Success
        );
        assert_eq!(LogSeverity::classify(">>> DEBUG <<<"), LogSeverity::Banner);
        assert_eq!(
            LogSeverity::classify("[Compiler] Optimized symbol: app"),
            LogSeverity::Compiler
        );
        assert_eq!(LogSeverity::classify("Step over: x"), LogSeverity::Step);
        assert_eq!(LogSeverity::classify("Debugger attached."), LogSeverity::Debugger);
        assert_eq!(LogSeverity::classify("Paused on start."), LogSeverity::Plain);
    }

    #[test]
    fn test_scenario_parse() {
        assert_eq!(Scenario::from_str("Debug").unwrap(), Scenario::Debug);
        assert_eq!(Scenario::Simulate.to_string(), "simulate");
    }
}
