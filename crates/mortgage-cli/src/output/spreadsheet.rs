use std::fs;
use std::path::Path;

use mortgage_core::scenario::ScenarioResult;
use rust_xlsxwriter::{Workbook, XlsxError};

/// Write the report workbook: one sheet per scenario, a header row of
/// field labels and a single row of formatted values.
pub fn write_workbook(
    path: &Path,
    report: &[(String, ScenarioResult)],
) -> Result<(), Box<dyn std::error::Error>> {
    let staging = super::staging_path(path);
    build_workbook(report)?.save(&staging)?;
    fs::rename(&staging, path)?;
    Ok(())
}

fn build_workbook(report: &[(String, ScenarioResult)]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    for (name, result) in report {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name.as_str())?;
        for (col, (label, value)) in result.rows().iter().enumerate() {
            sheet.write_string(0, col as u16, label.as_str())?;
            sheet.write_string(1, col as u16, value.as_str())?;
        }
    }

    Ok(workbook)
}
