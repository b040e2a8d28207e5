//! Source format detection.

use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Excel,
    Csv,
    Tsv,
    /// LogTen Pro `.txt` export: tab-delimited with `flight_*` field names.
    LogTen,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Excel => "excel",
            SourceFormat::Csv => "csv",
            SourceFormat::Tsv => "tsv",
            SourceFormat::LogTen => "logten",
        };
        write!(f, "{name}")
    }
}

/// Detect the source format from the file extension, sniffing `.txt`
/// content to tell LogTen exports from generic delimited text.
pub fn detect_format(path: &Path) -> Result<SourceFormat, IngestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" | "xlsm" => Ok(SourceFormat::Excel),
        "csv" => Ok(SourceFormat::Csv),
        "tsv" => Ok(SourceFormat::Tsv),
        "txt" => sniff_text_file(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

fn sniff_text_file(path: &Path) -> Result<SourceFormat, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::io(path, source))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(|source| IngestError::io(path, source))?;
    if header.contains("flight_flightDate") || header.contains("flight_totalTime") {
        Ok(SourceFormat::LogTen)
    } else if header.contains('\t') {
        Ok(SourceFormat::Tsv)
    } else {
        Ok(SourceFormat::Csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn by_extension() {
        assert_eq!(
            detect_format(Path::new("log.xlsx")).unwrap(),
            SourceFormat::Excel
        );
        assert_eq!(
            detect_format(Path::new("log.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            detect_format(Path::new("log.tsv")).unwrap(),
            SourceFormat::Tsv
        );
        assert!(detect_format(Path::new("log.pdf")).is_err());
    }

    #[test]
    fn txt_sniffing() {
        let dir = tempfile::tempdir().unwrap();

        let logten = dir.path().join("logten.txt");
        writeln!(
            std::fs::File::create(&logten).unwrap(),
            "flight_flightDate\tflight_totalTime"
        )
        .unwrap();
        assert_eq!(detect_format(&logten).unwrap(), SourceFormat::LogTen);

        let tabbed = dir.path().join("tabbed.txt");
        writeln!(std::fs::File::create(&tabbed).unwrap(), "Date\tFrom\tTo").unwrap();
        assert_eq!(detect_format(&tabbed).unwrap(), SourceFormat::Tsv);

        let plain = dir.path().join("plain.txt");
        writeln!(std::fs::File::create(&plain).unwrap(), "Date,From,To").unwrap();
        assert_eq!(detect_format(&plain).unwrap(), SourceFormat::Csv);
    }
}
