//! Machine-readable run report.

use std::path::Path;

use caai_model::RunReport;

use crate::error::ReportError;
use crate::values::FormValues;

/// The JSON document written alongside the form: the finalized values
/// plus every issue the run accumulated.
#[derive(Debug, serde::Serialize)]
pub struct RunDocument<'a> {
    pub values: &'a FormValues,
    pub report: &'a RunReport,
}

/// Write the run report and form values as pretty-printed JSON.
pub fn write_run_report_json(
    path: &Path,
    values: &FormValues,
    report: &RunReport,
) -> Result<(), ReportError> {
    let document = RunDocument { values, report };
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json).map_err(|source| ReportError::io(path, source))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let values = FormValues::default();
        let mut report = RunReport::new();
        report.note("ten types fit the form; eleven were found");
        write_run_report_json(&path, &values, &report).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.get("values").is_some());
        assert_eq!(parsed["report"]["issues"].as_array().unwrap().len(), 1);
    }
}
