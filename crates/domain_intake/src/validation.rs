//! Field validation
//!
//! Pure predicates over field values; no network or storage access. A
//! required field is valid iff it is non-empty after trimming, and the
//! vehicle year must additionally parse as an integer. Validation may be
//! re-run on every edit by the rendering layer, but it is authoritative only
//! at `advance()` time and at final submission.

use thiserror::Error;

use crate::draft::{ClaimDraft, DraftField};
use crate::steps::Step;

/// A field-local validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// The field that failed.
    pub field: DraftField,
    /// Claimant-facing message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates a single field value.
///
/// Returns `None` when the value is acceptable.
pub fn validate_field(field: DraftField, value: &str) -> Option<FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return field
            .is_required()
            .then(|| FieldError::new(field, format!("{} is required", field.label())));
    }

    if field == DraftField::VehicleYear && value.parse::<i32>().is_err() {
        return Some(FieldError::new(
            field,
            "Vehicle year must be a whole number",
        ));
    }

    None
}

/// Validates exactly the required field set of one step against the draft.
pub fn validate_step(draft: &ClaimDraft, step: Step) -> Vec<FieldError> {
    step.required_fields()
        .iter()
        .filter_map(|&field| validate_field(field, draft.get(field)))
        .collect()
}

/// Validates the entire draft (the union of all step field sets).
///
/// This is the authoritative check run at submission time.
pub fn validate_draft(draft: &ClaimDraft) -> Vec<FieldError> {
    DraftField::ALL
        .iter()
        .filter_map(|&field| validate_field(field, draft.get(field)))
        .collect()
}
