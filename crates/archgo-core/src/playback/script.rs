//! Deterministic playback scripts.
//!
//! A script is the full ordered list of lines with their offsets from the
//! start of the run. Timestamps are added by the scheduler at emission time.

use super::model::Scenario;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Maximum number of symbols reported by the simulate scenario.
pub const MAX_SYMBOLS: usize = 3;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:function|const|let|var)\s+(\w+)").expect("declaration pattern is valid")
});

/// A scripted line and when it fires, relative to the start of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub offset: Duration,
    pub message: String,
}

impl ScriptLine {
    fn new(offset_ms: u64, message: impl Into<String>) -> Self {
        Self {
            offset: Duration::from_millis(offset_ms),
            message: message.into(),
        }
    }
}

/// Returns up to [`MAX_SYMBOLS`] declared names from `source`, in order.
pub fn discover_symbols(source: &str) -> Vec<String> {
    DECLARATION
        .captures_iter(source)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .take(MAX_SYMBOLS)
        .collect()
}

/// Builds the script for `scenario`. Lines are sorted by offset.
pub fn build_script(scenario: Scenario, source: &str) -> Vec<ScriptLine> {
    match scenario {
        Scenario::Simulate => simulate_script(source),
        Scenario::Debug => debug_script(),
    }
}

fn simulate_script(source: &str) -> Vec<ScriptLine> {
    let symbols = discover_symbols(source);

    let mut lines = vec![
        ScriptLine::new(0, ">>> SYSTEM INITIALIZED: ARCHITECT-GO SANDBOX <<<"),
        ScriptLine::new(0, "Initializing execution environment..."),
        ScriptLine::new(800, "Analyzing AST for syntax integrity..."),
        ScriptLine::new(1500, "Resolving dependencies (firebase-admin, zod)..."),
        ScriptLine::new(2400, "Transpiling TypeScript to ES2022..."),
    ];

    for (i, symbol) in symbols.iter().enumerate() {
        lines.push(ScriptLine::new(
            3000 + i as u64 * 600,
            format!("[Compiler] Optimized symbol: {symbol}"),
        ));
    }

    let trailing: [u64; 4] = if symbols.is_empty() {
        [3000, 3800, 4500, 4700]
    } else {
        let base = 3000 + symbols.len() as u64 * 600;
        [base + 500, base + 1200, base + 2000, base + 2200]
    };

    lines.push(ScriptLine::new(trailing[0], "Injecting environment variables..."));
    lines.push(ScriptLine::new(trailing[1], "Starting isolated execution context..."));
    lines.push(ScriptLine::new(
        trailing[2],
        "SUCCESS: Backend logic deployed to sandbox (Memory: 14MB).",
    ));
    lines.push(ScriptLine::new(
        trailing[3],
        Scenario::Simulate.completion_marker(),
    ));

    lines
}

fn debug_script() -> Vec<ScriptLine> {
    vec![
        ScriptLine::new(0, ">>> ATTACHING DEBUGGER (Port 9229) <<<"),
        ScriptLine::new(0, "$ node --inspect-brk server.ts"),
        ScriptLine::new(600, "Debugger listening on ws://127.0.0.1:9229/8b34..."),
        ScriptLine::new(1200, "Debugger attached."),
        ScriptLine::new(1800, "Set breakpoints in: [AuthModule, Database, Security]."),
        ScriptLine::new(2400, "Paused on start."),
        ScriptLine::new(3000, "Step over: const app = initializeApp();"),
        ScriptLine::new(3800, "Step into: validateSchema(req.body);"),
        ScriptLine::new(4500, "Variable scope: { user: undefined, payload: Object }"),
        ScriptLine::new(5200, "Step over: await db.collection(\"users\").add(...)"),
        ScriptLine::new(6000, "No exceptions thrown."),
        ScriptLine::new(6500, Scenario::Debug.completion_marker()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(lines: &[ScriptLine]) -> Vec<&str> {
        lines.iter().map(|l| l.message.as_str()).collect()
    }

    fn position(lines: &[ScriptLine], needle: &str) -> usize {
        lines
            .iter()
            .position(|l| l.message.contains(needle))
            .unwrap_or_else(|| panic!("missing line: {needle}"))
    }

    #[test]
    fn test_discover_symbols_in_declaration_order() {
        let source = "function createUser() {}\nconst db = init();\nlet cache;\nvar extra;";
        assert_eq!(discover_symbols(source), vec!["createUser", "db", "cache"]);
    }

    #[test]
    fn test_three_symbols_precede_environment_injection() {
        let source = "const alpha = 1;\nfunction beta() {}\nlet gamma = 2;";
        let script = build_script(Scenario::Simulate, source);

        let optimized: Vec<_> = script
            .iter()
            .filter(|l| l.message.starts_with("[Compiler] Optimized symbol:"))
            .collect();
        assert_eq!(optimized.len(), 3);
        assert!(optimized[0].message.ends_with("alpha"));
        assert!(optimized[1].message.ends_with("beta"));
        assert!(optimized[2].message.ends_with("gamma"));

        let inject = position(&script, "Injecting environment variables");
        let last_symbol = position(&script, "Optimized symbol: gamma");
        assert!(last_symbol < inject);
        assert_eq!(script[inject].offset, Duration::from_millis(5300));
    }

    #[test]
    fn test_zero_symbols_keep_milestone_order() {
        let script = build_script(Scenario::Simulate, "SELECT * FROM users;");

        assert!(!script.iter().any(|l| l.message.contains("Optimized symbol")));
        assert_eq!(
            messages(&script),
            vec![
                ">>> SYSTEM INITIALIZED: ARCHITECT-GO SANDBOX <<<",
                "Initializing execution environment...",
                "Analyzing AST for syntax integrity...",
                "Resolving dependencies (firebase-admin, zod)...",
                "Transpiling TypeScript to ES2022...",
                "Injecting environment variables...",
                "Starting isolated execution context...",
                "SUCCESS: Backend logic deployed to sandbox (Memory: 14MB).",
                ">>> SIMULATION SEQUENCE COMPLETED <<<",
            ]
        );
        let offsets: Vec<u128> = script.iter().map(|l| l.offset.as_millis()).collect();
        assert_eq!(offsets, vec![0, 0, 800, 1500, 2400, 3000, 3800, 4500, 4700]);
    }

    #[test]
    fn test_scripts_are_sorted_by_offset() {
        for scenario in [Scenario::Simulate, Scenario::Debug] {
            let script = build_script(scenario, "const a = 1; const b = 2;");
            assert!(script.windows(2).all(|w| w[0].offset <= w[1].offset));
            assert_eq!(
                script.last().map(|l| l.message.as_str()),
                Some(scenario.completion_marker())
            );
        }
    }

    #[test]
    fn test_debug_script_ignores_source() {
        let a = build_script(Scenario::Debug, "");
        let b = build_script(Scenario::Debug, "const x = 1;");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_eq!(a.last().unwrap().offset, Duration::from_millis(6500));
    }
}
