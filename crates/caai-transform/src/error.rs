use caai_model::CanonicalField;

/// Why one row was rejected. Row-level: the batch continues without it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("{field} value {value:?} matches no accepted grammar")]
    InvalidValue {
        field: CanonicalField,
        value: String,
    },

    #[error("required field {field} is empty")]
    MissingRequired { field: CanonicalField },
}

impl NormalizationError {
    pub(crate) fn invalid(field: CanonicalField, value: &str) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }

    /// The field this error names.
    pub fn field(&self) -> CanonicalField {
        match self {
            Self::InvalidValue { field, .. } | Self::MissingRequired { field } => *field,
        }
    }
}
