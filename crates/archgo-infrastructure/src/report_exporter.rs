//! Writes exported security reports to disk.

use archgo_core::Result;
use archgo_core::export::SecurityReport;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `report` into `dir`, creating the directory when missing.
///
/// Returns the path of the written file.
pub fn write_report(report: &SecurityReport, dir: &Path) -> Result<PathBuf> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(&report.file_name);
    fs::write(&path, &report.content)?;
    tracing::info!("[Export] Security report written to {:?}", path);
    Ok(path)
}
