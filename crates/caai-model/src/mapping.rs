//! Column mapping types shared by the resolver and the normalizer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::fields::CanonicalField;

/// Where an explicit mapping entry points: a source header name or a
/// 0-based column index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLocator {
    Index(usize),
    Name(String),
}

/// Explicit user-supplied mapping entries, before resolution against the
/// actual header row. Entries here win unconditionally over alias matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    pub entries: BTreeMap<CanonicalField, ColumnLocator>,
}

impl MappingSpec {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A resolved mapping: canonical field to 0-based source column index.
///
/// Invariant: values are unique — at most one source column per field and
/// at most one field per source column. The resolver enforces this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    fields: BTreeMap<CanonicalField, usize>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field mapping. Returns false (and leaves the mapping
    /// unchanged) when either the field or the source column is already
    /// taken.
    pub fn insert(&mut self, field: CanonicalField, source_index: usize) -> bool {
        if self.fields.contains_key(&field) || self.is_source_taken(source_index) {
            return false;
        }
        self.fields.insert(field, source_index);
        true
    }

    pub fn get(&self, field: CanonicalField) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_source_taken(&self, source_index: usize) -> bool {
        self.fields.values().any(|idx| *idx == source_index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, usize)> + '_ {
        self.fields.iter().map(|(field, idx)| (*field, *idx))
    }

    /// Required canonical fields that this mapping does not cover.
    pub fn unresolved_required(&self) -> BTreeSet<CanonicalField> {
        CanonicalField::REQUIRED
            .iter()
            .copied()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// True when not a single required field resolved — the fatal case.
    pub fn is_unusable(&self) -> bool {
        CanonicalField::REQUIRED
            .iter()
            .all(|field| !self.contains(*field))
    }
}

/// Everything the resolver returns: the mapping plus its deficiency report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingOutcome {
    pub mapping: ColumnMapping,
    /// Required fields left unresolved after every pass. Reported, not fatal.
    pub unresolved_required: BTreeSet<CanonicalField>,
    /// Source headers no field claimed (informational).
    pub unmapped_headers: Vec<String>,
    /// Explicit-mapping entries that could not be applied.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicate_field_and_source() {
        let mut mapping = ColumnMapping::new();
        assert!(mapping.insert(CanonicalField::Date, 0));
        // same field again
        assert!(!mapping.insert(CanonicalField::Date, 1));
        // same source column for a different field
        assert!(!mapping.insert(CanonicalField::Pic, 0));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn unresolved_required_reports_missing() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::Date, 0);
        mapping.insert(CanonicalField::TotalTime, 1);
        let unresolved = mapping.unresolved_required();
        assert!(unresolved.contains(&CanonicalField::Registration));
        assert!(!unresolved.contains(&CanonicalField::Date));
        assert!(!mapping.is_unusable());
    }

    #[test]
    fn empty_mapping_is_unusable() {
        assert!(ColumnMapping::new().is_unusable());
    }
}
