pub mod markdown;
pub mod spreadsheet;
pub mod table;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mortgage_core::scenario::ScenarioResult;

pub const WORKBOOK_FILE: &str = "loan_results.xlsx";
pub const MARKDOWN_FILE: &str = "loan_results.md";

/// Write both report files into `dir`.
pub fn write_reports(
    dir: &Path,
    report: &[(String, ScenarioResult)],
) -> Result<(), Box<dyn std::error::Error>> {
    spreadsheet::write_workbook(&dir.join(WORKBOOK_FILE), report)?;
    markdown::write_markdown(&dir.join(MARKDOWN_FILE), report)?;
    Ok(())
}

/// Path for the in-progress copy of `target`, renamed over it once complete.
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Write `content` to `target` via a staging file and atomic rename, so a
/// failed run never leaves a half-written report.
fn write_atomic(target: &Path, content: &str) -> io::Result<()> {
    let staging = staging_path(target);
    fs::write(&staging, content)?;
    fs::rename(&staging, target)
}
