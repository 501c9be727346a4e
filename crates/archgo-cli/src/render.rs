//! Terminal rendering for results, vault listings and log lines.

use archgo_core::analysis::{AnalysisResult, ViabilityBand};
use archgo_core::playback::{LogEvent, LogSeverity};
use archgo_core::vault::VaultEntry;
use colored::{ColoredString, Colorize};

fn score_label(result: &AnalysisResult) -> ColoredString {
    let label = format!("{}/100 ({})", result.viability_score, result.viability_band());
    match result.viability_band() {
        ViabilityBand::High => label.bright_green().bold(),
        ViabilityBand::Moderate => label.bright_yellow().bold(),
        ViabilityBand::Low => label.bright_red().bold(),
    }
}

fn section(title: &str, body: &str) {
    println!();
    println!("{}", format!("== {} ==", title).bright_magenta().bold());
    for line in body.lines() {
        println!("{}", line);
    }
}

pub fn print_result(result: &AnalysisResult) {
    println!("{} {}", "Viability:".bold(), score_label(result));
    section("Viability Analysis", &result.viability_analysis);
    section("Strategy 2026", &result.strategy_2026);
    section("Data Model", &result.data_model);
    section("Backend Implementation", &result.backend_impl);
    section("Security Context", &result.security_context);
}

pub fn print_rules(result: &AnalysisResult) {
    let rules = result.security_rules();
    if rules.is_empty() {
        println!("{}", "No rule blocks in this security context.".bright_black());
        return;
    }
    for (i, rule) in rules.iter().enumerate() {
        println!("{}", format!("-- rule block {} --", i + 1).bright_black());
        println!("{}", rule.cyan());
    }
}

pub fn print_vault_entries(entries: &[VaultEntry]) {
    if entries.is_empty() {
        println!("{}", "Vault is empty.".bright_black());
        return;
    }
    for entry in entries {
        let created = entry
            .created_at_utc()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {}  {}",
            entry.id.bright_black(),
            created,
            score_label(&entry.result),
            entry.title.bold()
        );
    }
}

pub fn print_log_event(event: &LogEvent) {
    let message = match event.severity() {
        LogSeverity::Error => event.message.bright_red(),
        LogSeverity::Success => event.message.bright_green(),
        LogSeverity::Warning => event.message.yellow(),
        LogSeverity::Banner => event.message.bright_cyan().bold(),
        LogSeverity::Compiler => event.message.magenta(),
        LogSeverity::Step => event.message.bright_blue(),
        LogSeverity::Debugger => event.message.cyan(),
        LogSeverity::Plain => event.message.normal(),
    };
    println!("{} {}", format!("[{}]", event.timestamp).bright_black(), message);
}
