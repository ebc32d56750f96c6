//! Intake wizard errors

use thiserror::Error;

use crate::ids::ClaimId;
use crate::ports::ApiError;
use crate::validation::FieldError;

/// One photo that failed to upload during the submission protocol.
#[derive(Debug)]
pub struct PhotoUploadFailure {
    /// Index of the photo at submission time.
    pub index: usize,
    /// File name of the photo.
    pub file_name: String,
    /// The underlying API failure.
    pub error: ApiError,
}

/// Errors surfaced by the intake wizard.
///
/// Nothing here is fatal: every failure is scoped to the current attempt and
/// recoverable by correcting the form or retrying the submission.
#[derive(Debug, Error)]
pub enum WizardError {
    /// One or more fields of the active set failed validation.
    #[error("validation failed for {n} field(s)", n = .0.len())]
    Validation(Vec<FieldError>),

    /// Navigation or editing attempted while a submission is in flight.
    #[error("a submission is in progress")]
    SubmissionInFlight,

    /// The claim was already submitted; the wizard is done.
    #[error("the claim has already been submitted")]
    AlreadySubmitted,

    /// `submit()` called before reaching the photo step.
    #[error("submission is only available from the final step")]
    NotReadyToSubmit,

    /// Navigation or editing attempted while a failure notice is pending.
    #[error("a failed submission must be retried or dismissed first")]
    FailurePending,

    /// `dismiss_failure()` called with no failure to dismiss.
    #[error("there is no failed submission to dismiss")]
    NoFailureToDismiss,

    /// No staged photo exists at the given index.
    #[error("no staged photo at index {0}")]
    UnknownPhoto(usize),

    /// Phase 1 failed: the claim was not created and no uploads were issued.
    #[error("claim creation failed: {0}")]
    CreateClaim(#[source] ApiError),

    /// Phase 2 failed partially or fully: the claim exists, the listed
    /// photos do not. The failed photos remain staged for retry.
    #[error("{n} photo upload(s) failed for claim {claim_id}", n = .failed.len())]
    PhotoUploads {
        claim_id: ClaimId,
        failed: Vec<PhotoUploadFailure>,
    },
}

impl WizardError {
    /// Returns true if retrying the submission may succeed without edits.
    pub fn is_retryable(&self) -> bool {
        match self {
            WizardError::CreateClaim(err) => err.is_transient(),
            WizardError::PhotoUploads { failed, .. } => {
                failed.iter().any(|failure| failure.error.is_transient())
            }
            _ => false,
        }
    }
}
