//! Run-level issue accumulation.
//!
//! Row-level problems never abort a batch; they land here and ride along
//! with the best-effort result. The only fatal condition in the whole
//! pipeline is a mapping in which no required field resolved at all, and
//! that is decided by the caller, not here.

use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Advisory,
}

/// What went wrong, per the error-handling design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required canonical field stayed unresolved after mapping.
    MappingDeficiency,
    /// A row was rejected because a value matched no accepted grammar.
    RowRejected,
    /// A non-negativity clamp or similar fix-up occurred during
    /// classification.
    ClassificationAdvisory,
    /// An aircraft type had no known group; totals are incomplete for it.
    UnresolvedAircraftGroup,
    /// Anything else worth telling the user (mapping-file warnings, form
    /// row overflow).
    Note,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
    /// Canonical field involved, when one is.
    pub field: Option<CanonicalField>,
    /// 1-based source row, when row-scoped.
    pub row: Option<usize>,
}

/// Accumulated issues for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub issues: Vec<RunIssue>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: RunIssue) {
        self.issues.push(issue);
    }

    pub fn mapping_deficiency(&mut self, field: CanonicalField) {
        self.issues.push(RunIssue {
            kind: IssueKind::MappingDeficiency,
            severity: IssueSeverity::Warning,
            message: format!("required column not resolved: {field}"),
            field: Some(field),
            row: None,
        });
    }

    pub fn row_rejected(&mut self, row: usize, field: CanonicalField, reason: impl Into<String>) {
        self.issues.push(RunIssue {
            kind: IssueKind::RowRejected,
            severity: IssueSeverity::Error,
            message: format!("row {row}: {}", reason.into()),
            field: Some(field),
            row: Some(row),
        });
    }

    pub fn advisory(&mut self, row: Option<usize>, message: impl Into<String>) {
        self.issues.push(RunIssue {
            kind: IssueKind::ClassificationAdvisory,
            severity: IssueSeverity::Advisory,
            message: message.into(),
            field: None,
            row,
        });
    }

    pub fn unresolved_group(&mut self, aircraft_type: &str) {
        self.issues.push(RunIssue {
            kind: IssueKind::UnresolvedAircraftGroup,
            severity: IssueSeverity::Warning,
            message: format!("aircraft type {aircraft_type:?} has no known CAAI group"),
            field: None,
            row: None,
        });
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.issues.push(RunIssue {
            kind: IssueKind::Note,
            severity: IssueSeverity::Warning,
            message: message.into(),
            field: None,
            row: None,
        });
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Fold another report's issues into this one.
    pub fn merge(&mut self, other: RunReport) {
        self.issues.extend(other.issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_severity() {
        let mut report = RunReport::new();
        report.mapping_deficiency(CanonicalField::Date);
        report.row_rejected(3, CanonicalField::TotalTime, "abc");
        report.advisory(Some(4), "negative PIC credit clamped to zero");
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn report_serializes() {
        let mut report = RunReport::new();
        report.unresolved_group("ZZZZ");
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: RunReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.issues.len(), 1);
        assert_eq!(round.issues[0].kind, IssueKind::UnresolvedAircraftGroup);
    }
}
