//! Entry point: read any supported source into a raw table.

use std::path::Path;

use tracing::info;

use crate::delimited::read_delimited;
use crate::error::IngestError;
use crate::excel::read_workbook;
use crate::format::{SourceFormat, detect_format};
use crate::table::RawTable;

/// Read a logbook source, auto-detecting the format unless one is forced.
/// Returns the format actually used alongside the table.
pub fn read_source(
    path: &Path,
    format: Option<SourceFormat>,
) -> Result<(SourceFormat, RawTable), IngestError> {
    let format = match format {
        Some(format) => format,
        None => detect_format(path)?,
    };

    let table = match format {
        SourceFormat::Excel => read_workbook(path)?,
        SourceFormat::Csv => read_delimited(path, b',')?,
        SourceFormat::Tsv | SourceFormat::LogTen => read_delimited(path, b'\t')?,
    };

    info!(
        path = %path.display(),
        %format,
        rows = table.rows.len(),
        columns = table.headers.len(),
        "source read"
    );
    Ok((format, table))
}
