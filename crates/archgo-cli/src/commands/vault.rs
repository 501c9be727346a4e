//! `archgo vault` subcommands.

use crate::context::AppContext;
use crate::render;
use anyhow::{Result, anyhow};
use archgo_core::export::SecurityReport;
use archgo_infrastructure::report_exporter::write_report;
use chrono::Utc;
use colored::Colorize;
use std::path::Path;

pub fn list(ctx: &AppContext) -> Result<()> {
    render::print_vault_entries(&ctx.vault_store()?.list());
    Ok(())
}

pub fn show(ctx: &AppContext, id: &str) -> Result<()> {
    let entry = ctx
        .vault_store()?
        .get(id)
        .ok_or_else(|| anyhow!("No vault entry with id {}", id))?;
    println!("{}", entry.title.bold());
    render::print_result(&entry.result);
    Ok(())
}

pub fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let vault = ctx.vault_store()?;
    if vault.get(id).is_none() {
        println!("{}", format!("No vault entry with id {}", id).yellow());
        return Ok(());
    }
    let remaining = vault.delete(id)?;
    println!("{}", format!("Deleted {} ({} left)", id, remaining.len()).green());
    Ok(())
}

pub fn export(ctx: &AppContext, id: &str, dir: Option<&Path>) -> Result<()> {
    let entry = ctx
        .vault_store()?
        .get(id)
        .ok_or_else(|| anyhow!("No vault entry with id {}", id))?;
    let report = SecurityReport::from_result(&entry.result, Utc::now());
    let path = write_report(&report, &ctx.export_dir(dir))?;
    println!("{}", format!("Security report written to {}", path.display()).green());
    Ok(())
}
