//! Header-to-field resolution.
//!
//! Resolution runs in four passes, each consuming source columns so a
//! column maps at most once:
//!
//! 1. explicit entries from the mapping file (win unconditionally);
//! 2. exact normalized alias match;
//! 3. substring alias match, for aliases of three characters or more;
//! 4. a conservative fuzzy pass for still-unmapped *required* fields.
//!
//! Headers that match nothing are fine; required fields that resolve
//! nowhere are reported in the outcome, and only a mapping with zero
//! resolved required fields is unusable.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use tracing::debug;

use caai_model::{CanonicalField, ColumnLocator, ColumnMapping, MappingOutcome, MappingSpec};
use caai_standards::HEADER_ALIASES;

use crate::utils::normalize_header;

/// Minimum alias length considered for substring matching; shorter aliases
/// ("to", "cc") produce too many false hits inside other headers.
const SUBSTRING_MIN_ALIAS_LEN: usize = 3;

/// Jaro-Winkler floor for the fuzzy pass. Deliberately strict: a miss here
/// surfaces as a mapping deficiency the user can fix with an explicit
/// entry, while a wrong hit silently corrupts every row.
const FUZZY_MIN_SCORE: f64 = 0.92;

/// Resolve raw source headers against the alias dictionary and an optional
/// explicit mapping.
pub fn resolve(raw_headers: &[String], explicit: Option<&MappingSpec>) -> MappingOutcome {
    let normalized: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
    let mut mapping = ColumnMapping::new();
    let mut warnings = Vec::new();

    if let Some(spec) = explicit {
        apply_explicit(spec, raw_headers, &normalized, &mut mapping, &mut warnings);
    }

    exact_pass(&normalized, &mut mapping);
    substring_pass(&normalized, &mut mapping);
    fuzzy_pass(&normalized, &mut mapping);

    let unresolved_required = mapping.unresolved_required();
    let unmapped_headers = raw_headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| !mapping.is_source_taken(*idx) && !header.trim().is_empty())
        .map(|(_, header)| header.clone())
        .collect();

    debug!(
        mapped = mapping.len(),
        unresolved = unresolved_required.len(),
        "column resolution finished"
    );

    MappingOutcome {
        mapping,
        unresolved_required,
        unmapped_headers,
        warnings,
    }
}

fn apply_explicit(
    spec: &MappingSpec,
    raw_headers: &[String],
    normalized: &[String],
    mapping: &mut ColumnMapping,
    warnings: &mut Vec<String>,
) {
    for (field, locator) in &spec.entries {
        let resolved = match locator {
            ColumnLocator::Index(idx) => {
                if *idx < raw_headers.len() {
                    Some(*idx)
                } else {
                    warnings.push(format!(
                        "mapping entry {field}: column index {idx} is out of range \
                         (source has {} columns)",
                        raw_headers.len()
                    ));
                    None
                }
            }
            ColumnLocator::Name(name) => {
                let wanted = normalize_header(name);
                let exact = normalized.iter().position(|header| *header == wanted);
                let found = exact.or_else(|| {
                    normalized
                        .iter()
                        .position(|header| !wanted.is_empty() && header.contains(&wanted))
                });
                if found.is_none() {
                    warnings.push(format!(
                        "mapping entry {field}: source column {name:?} not found in headers"
                    ));
                }
                found
            }
        };
        if let Some(idx) = resolved
            && !mapping.insert(*field, idx)
        {
            warnings.push(format!(
                "mapping entry {field}: column {idx} already claimed by another field"
            ));
        }
    }
}

fn exact_pass(normalized: &[String], mapping: &mut ColumnMapping) {
    for (field, aliases) in HEADER_ALIASES {
        if mapping.contains(*field) {
            continue;
        }
        'aliases: for alias in *aliases {
            let wanted = normalize_header(alias);
            for (idx, header) in normalized.iter().enumerate() {
                if mapping.is_source_taken(idx) {
                    continue;
                }
                if *header == wanted {
                    mapping.insert(*field, idx);
                    break 'aliases;
                }
            }
        }
    }
}

fn substring_pass(normalized: &[String], mapping: &mut ColumnMapping) {
    for (field, aliases) in HEADER_ALIASES {
        if mapping.contains(*field) {
            continue;
        }
        'aliases: for alias in *aliases {
            let wanted = normalize_header(alias);
            if wanted.chars().count() < SUBSTRING_MIN_ALIAS_LEN {
                continue;
            }
            for (idx, header) in normalized.iter().enumerate() {
                if mapping.is_source_taken(idx) || header.is_empty() {
                    continue;
                }
                if header.contains(&wanted) || wanted.contains(header.as_str()) {
                    mapping.insert(*field, idx);
                    break 'aliases;
                }
            }
        }
    }
}

/// Last-chance pass for required fields only: headers that nearly match an
/// alias (typos, truncation) score via Jaro-Winkler.
fn fuzzy_pass(normalized: &[String], mapping: &mut ColumnMapping) {
    for field in CanonicalField::REQUIRED {
        if mapping.contains(field) {
            continue;
        }
        let aliases = caai_standards::aliases_for(field);
        let mut best: Option<(usize, f64)> = None;
        for (idx, header) in normalized.iter().enumerate() {
            if mapping.is_source_taken(idx) || header.is_empty() {
                continue;
            }
            for alias in aliases {
                let wanted = normalize_header(alias);
                let score = jaro_similarity(header.chars(), wanted.chars());
                if score >= FUZZY_MIN_SCORE
                    && best.is_none_or(|(_, best_score)| score > best_score)
                {
                    best = Some((idx, score));
                }
            }
        }
        if let Some((idx, score)) = best {
            debug!(%field, column = idx, score, "fuzzy header match");
            mapping.insert(field, idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn exact_aliases_resolve() {
        let outcome = resolve(
            &headers(&["Date", "From", "To", "Tail Number", "A/C Type", "Total Time"]),
            None,
        );
        assert_eq!(outcome.mapping.get(CanonicalField::Date), Some(0));
        assert_eq!(outcome.mapping.get(CanonicalField::Registration), Some(3));
        assert_eq!(outcome.mapping.get(CanonicalField::AircraftType), Some(4));
        assert_eq!(outcome.mapping.get(CanonicalField::TotalTime), Some(5));
        assert!(outcome.unresolved_required.is_empty());
    }

    #[test]
    fn hebrew_headers_resolve() {
        let outcome = resolve(&headers(&["תאריך", "ממקום", "למקום", "רישום"]), None);
        assert_eq!(outcome.mapping.get(CanonicalField::Date), Some(0));
        assert_eq!(outcome.mapping.get(CanonicalField::From), Some(1));
        assert_eq!(outcome.mapping.get(CanonicalField::To), Some(2));
        assert_eq!(outcome.mapping.get(CanonicalField::Registration), Some(3));
    }

    #[test]
    fn unknown_headers_are_not_errors() {
        let outcome = resolve(&headers(&["Date", "Favorite Color"]), None);
        assert_eq!(outcome.mapping.len(), 1);
        assert_eq!(outcome.unmapped_headers, vec!["Favorite Color".to_string()]);
    }

    #[test]
    fn unresolved_required_is_reported_not_fatal() {
        let outcome = resolve(&headers(&["Date", "Total Time"]), None);
        assert!(outcome.unresolved_required.contains(&CanonicalField::Registration));
        assert!(!outcome.mapping.is_unusable());
    }

    #[test]
    fn explicit_mapping_wins_over_aliases() {
        let mut spec = MappingSpec::default();
        spec.entries.insert(
            CanonicalField::TotalTime,
            ColumnLocator::Name("Block Hours".to_string()),
        );
        let outcome = resolve(&headers(&["Date", "Total Time", "Block Hours"]), Some(&spec));
        // Explicit entry claims column 2; the alias pass then cannot claim
        // "Total Time" for the already-mapped field.
        assert_eq!(outcome.mapping.get(CanonicalField::TotalTime), Some(2));
    }

    #[test]
    fn explicit_mapping_by_index() {
        let mut spec = MappingSpec::default();
        spec.entries
            .insert(CanonicalField::Pic, ColumnLocator::Index(1));
        let outcome = resolve(&headers(&["Date", "P1 Hours"]), Some(&spec));
        assert_eq!(outcome.mapping.get(CanonicalField::Pic), Some(1));
    }

    #[test]
    fn explicit_out_of_range_index_warns() {
        let mut spec = MappingSpec::default();
        spec.entries
            .insert(CanonicalField::Pic, ColumnLocator::Index(9));
        let outcome = resolve(&headers(&["Date"]), Some(&spec));
        assert_eq!(outcome.mapping.get(CanonicalField::Pic), None);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn substring_pass_catches_decorated_headers() {
        let outcome = resolve(&headers(&["Flight Date (UTC)", "Total Time (hrs)"]), None);
        assert_eq!(outcome.mapping.get(CanonicalField::Date), Some(0));
        assert_eq!(outcome.mapping.get(CanonicalField::TotalTime), Some(1));
    }

    #[test]
    fn fuzzy_pass_catches_typos_in_required_fields() {
        let outcome = resolve(&headers(&["Registraton", "Date"]), None);
        assert_eq!(outcome.mapping.get(CanonicalField::Registration), Some(0));
    }

    #[test]
    fn each_source_column_claimed_once() {
        let outcome = resolve(&headers(&["Total", "Total Time"]), None);
        // Exact pass takes "Total Time"; "Total" may then match by alias,
        // but never the same column twice.
        let claimed: Vec<usize> = outcome.mapping.iter().map(|(_, idx)| idx).collect();
        let mut deduped = claimed.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(claimed.len(), deduped.len());
    }
}
