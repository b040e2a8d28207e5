//! Explicit mapping files.
//!
//! A TOML file with a `[columns]` table lets the user pin any canonical
//! field to a source column by header name or 0-based index:
//!
//! ```toml
//! [columns]
//! "Total Time" = "Block Hours"
//! PIC = "P1 Time"
//! Date = 0
//! ```
//!
//! Unknown canonical names are collected as warnings, not errors, so a
//! stale mapping file degrades instead of blocking a run.

use std::path::Path;

use caai_model::{CanonicalField, ColumnLocator, MappingSpec};

use crate::error::MapError;

/// A parsed mapping file: the usable spec plus warnings for entries that
/// could not be understood.
#[derive(Debug, Default)]
pub struct LoadedSpec {
    pub spec: MappingSpec,
    pub warnings: Vec<String>,
}

/// Load and parse an explicit mapping file.
pub fn load_mapping_file(path: &Path) -> Result<LoadedSpec, MapError> {
    let raw = std::fs::read_to_string(path).map_err(|source| MapError::io(path, source))?;
    parse_mapping_file(&raw, path)
}

fn parse_mapping_file(raw: &str, path: &Path) -> Result<LoadedSpec, MapError> {
    let value: toml::Value = raw
        .parse()
        .map_err(|source| MapError::toml(path, source))?;
    let Some(columns) = value.get("columns").and_then(toml::Value::as_table) else {
        return Err(MapError::MissingColumnsTable {
            path: path.to_path_buf(),
        });
    };

    let mut loaded = LoadedSpec::default();
    for (key, entry) in columns {
        let Ok(field) = key.parse::<CanonicalField>() else {
            loaded
                .warnings
                .push(format!("unknown column name in mapping file: {key:?}"));
            continue;
        };
        let locator = match entry {
            toml::Value::Integer(idx) if *idx >= 0 => ColumnLocator::Index(*idx as usize),
            toml::Value::String(name) if !name.trim().is_empty() => {
                ColumnLocator::Name(name.trim().to_string())
            }
            other => {
                loaded.warnings.push(format!(
                    "mapping entry {key:?} must be a column name or non-negative index, got {other}"
                ));
                continue;
            }
        };
        if loaded.spec.entries.insert(field, locator).is_some() {
            loaded
                .warnings
                .push(format!("duplicate mapping entry for {field}"));
        }
    }
    Ok(loaded)
}
