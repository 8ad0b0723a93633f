use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rejected input field, named the way it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// An invariant broke after validation passed. This is a defect, not a user error.
    #[error("Computation fault: {0}")]
    ComputationFault(String),
}

impl AnalysisError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }

    /// Field-level details for validation failures, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AnalysisError::Validation(fields) => fields,
            AnalysisError::ComputationFault(_) => &[],
        }
    }
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
