use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Excel {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no sheets")]
    EmptyWorkbook { path: PathBuf },

    #[error(
        "cannot determine format of {path} (extension {extension:?}); \
         supported: .xlsx, .xls, .xlsm, .csv, .tsv, .txt"
    )]
    UnsupportedFormat { path: PathBuf, extension: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn excel(path: impl Into<PathBuf>, source: calamine::Error) -> Self {
        Self::Excel {
            path: path.into(),
            source,
        }
    }
}
