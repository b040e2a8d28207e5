//! CSV/TSV reading.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;
use crate::table::{RawTable, assemble};

/// Read a delimited file into a raw table. Rows are read leniently
/// (ragged rows allowed); header location is detected afterwards.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let table = assemble(raw_rows);
    debug!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "read delimited file"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_csv_with_header() {
        let (_dir, path) = write_file(
            "log.csv",
            "Date,From,To,Total Time\n2024-01-15,KVRB,KFPR,1.5\n",
        );
        let table = read_delimited(&path, b',').unwrap();
        assert_eq!(table.headers, vec!["Date", "From", "To", "Total Time"]);
        assert_eq!(table.rows, vec![vec!["2024-01-15", "KVRB", "KFPR", "1.5"]]);
    }

    #[test]
    fn reads_tsv() {
        let (_dir, path) = write_file("log.tsv", "Date\tTotal Time\n2024-01-15\t2.0\n");
        let table = read_delimited(&path, b'\t').unwrap();
        assert_eq!(table.headers, vec!["Date", "Total Time"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn ragged_rows_do_not_fail() {
        let (_dir, path) = write_file("log.csv", "Date,From,To\n2024-01-15,KVRB\n");
        let table = read_delimited(&path, b',').unwrap();
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn empty_file_yields_empty_table() {
        let (_dir, path) = write_file("log.csv", "");
        let table = read_delimited(&path, b',').unwrap();
        assert!(table.is_empty());
        assert!(table.headers.is_empty());
    }
}
