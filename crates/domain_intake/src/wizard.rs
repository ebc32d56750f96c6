//! FNOL intake wizard
//!
//! Owns step progression, per-step validation gating, photo staging, and the
//! two-phase submission protocol. The phase is an explicit enum with a
//! transition table, so states like "advancing while a submission is in
//! flight" are rejected structurally instead of by scattered flags.

use futures::future::join_all;
use std::fmt;
use std::sync::Arc;

use crate::draft::{ClaimDraft, DraftField, FnolSubmission};
use crate::error::{PhotoUploadFailure, WizardError};
use crate::ids::ClaimId;
use crate::photos::{PhotoSet, PreviewHandle, StagedPhoto};
use crate::ports::{ClaimIntakePort, PreviewRegistry};
use crate::steps::Step;
use crate::validation::{validate_step, FieldError};

/// Lifecycle phase of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Collecting form input at the given step.
    Collecting(Step),
    /// The submission protocol is running; the form is frozen.
    Submitting,
    /// The claim was created and all photos uploaded.
    Submitted { claim_id: ClaimId },
    /// The last submission attempt failed. `claim_id` is present when claim
    /// creation succeeded and only photo uploads failed.
    Failed { claim_id: Option<ClaimId> },
}

impl WizardPhase {
    /// Short phase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            WizardPhase::Collecting(_) => "collecting",
            WizardPhase::Submitting => "submitting",
            WizardPhase::Submitted { .. } => "submitted",
            WizardPhase::Failed { .. } => "failed",
        }
    }

    /// Checks whether `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: &WizardPhase) -> bool {
        use WizardPhase::*;
        match (self, next) {
            // Step navigation moves one step at a time.
            (Collecting(from), Collecting(to)) => {
                from.next() == Some(*to) || from.prev() == Some(*to)
            }
            // Submission starts from the final step or as a retry.
            (Collecting(Step::Photos), Submitting) => true,
            (Failed { .. }, Submitting) => true,
            // Dismissing a failure returns to the form.
            (Failed { .. }, Collecting(Step::Photos)) => true,
            // The protocol settles into exactly one of these.
            (Submitting, Submitted { .. }) => true,
            (Submitting, Failed { .. }) => true,
            _ => false,
        }
    }
}

/// The FNOL intake wizard.
///
/// Exclusively owns the draft, the staged photos, and the phase; the
/// rendering layer reads state through accessors and mutates it only through
/// the operations below.
pub struct Wizard {
    phase: WizardPhase,
    draft: ClaimDraft,
    photos: PhotoSet,
    field_errors: Vec<FieldError>,
    api: Arc<dyn ClaimIntakePort>,
    previews: Arc<dyn PreviewRegistry>,
}

impl Wizard {
    /// Creates a wizard at the first step with an empty draft.
    pub fn new(api: Arc<dyn ClaimIntakePort>, previews: Arc<dyn PreviewRegistry>) -> Self {
        Self {
            phase: WizardPhase::Collecting(Step::FIRST),
            draft: ClaimDraft::new(),
            photos: PhotoSet::new(),
            field_errors: Vec::new(),
            api,
            previews,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// The active step, if the wizard is collecting input.
    pub fn step(&self) -> Option<Step> {
        match self.phase {
            WizardPhase::Collecting(step) => Some(step),
            _ => None,
        }
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }

    /// Field errors from the last gated operation, for display.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Overwrites one draft field. Only available while collecting input.
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.collecting_step()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Moves forward one step if the active step's required fields validate.
    ///
    /// On validation failure the step is unchanged and the per-field errors
    /// are recorded and returned. Advancing from the final step is a no-op.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let step = self.collecting_step()?;

        let errors = validate_step(&self.draft, step);
        if !errors.is_empty() {
            self.field_errors.clone_from(&errors);
            return Err(WizardError::Validation(errors));
        }
        self.field_errors.clear();

        match step.next() {
            Some(next) => {
                self.transition(WizardPhase::Collecting(next));
                Ok(next)
            }
            None => Ok(step),
        }
    }

    /// Moves back one step. Never validates, never discards entered data.
    /// Retreating from the first step is a no-op.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let step = self.collecting_step()?;

        match step.prev() {
            Some(prev) => {
                self.transition(WizardPhase::Collecting(prev));
                Ok(prev)
            }
            None => Ok(step),
        }
    }

    /// Stages a photo and acquires its preview handle. Returns the photo's
    /// index in the set.
    pub fn stage_photo(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<usize, WizardError> {
        self.collecting_step()?;

        let file_name = file_name.into();
        let preview = PreviewHandle::acquire(Arc::clone(&self.previews), &file_name);
        let index = self
            .photos
            .push(StagedPhoto::new(file_name, content_type, content, preview));
        Ok(index)
    }

    /// Removes the photo at `index`, releasing its preview handle.
    pub fn remove_photo(&mut self, index: usize) -> Result<(), WizardError> {
        self.collecting_step()?;

        if self.photos.remove(index) {
            Ok(())
        } else {
            Err(WizardError::UnknownPhoto(index))
        }
    }

    /// Runs the two-phase submission protocol.
    ///
    /// Phase 1 creates the claim from the validated draft and must complete
    /// before phase 2 issues all photo uploads concurrently. On a photo-phase
    /// failure the claim id is retained and a later call retries only the
    /// photos still staged; on a creation failure the whole protocol reruns.
    pub async fn submit(&mut self) -> Result<ClaimId, WizardError> {
        let existing_claim = match &self.phase {
            WizardPhase::Collecting(Step::Photos) => None,
            WizardPhase::Failed { claim_id } => *claim_id,
            WizardPhase::Collecting(_) => return Err(WizardError::NotReadyToSubmit),
            WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted { .. } => return Err(WizardError::AlreadySubmitted),
        };

        let claim_id = match existing_claim {
            Some(claim_id) => {
                self.transition(WizardPhase::Submitting);
                tracing::info!(
                    %claim_id,
                    remaining = self.photos.len(),
                    "retrying photo uploads for existing claim"
                );
                claim_id
            }
            None => {
                let submission = match FnolSubmission::try_from(&self.draft) {
                    Ok(submission) => submission,
                    Err(errors) => {
                        self.field_errors.clone_from(&errors);
                        return Err(WizardError::Validation(errors));
                    }
                };
                self.field_errors.clear();
                self.transition(WizardPhase::Submitting);

                match self.api.create_claim(&submission).await {
                    Ok(claim_id) => {
                        tracing::info!(%claim_id, photos = self.photos.len(), "claim created");
                        claim_id
                    }
                    Err(error) => {
                        tracing::warn!(%error, "claim creation failed, no uploads issued");
                        self.transition(WizardPhase::Failed { claim_id: None });
                        return Err(WizardError::CreateClaim(error));
                    }
                }
            }
        };

        let failed = self.upload_photos(claim_id).await;
        if !failed.is_empty() {
            let keep: Vec<usize> = failed.iter().map(|failure| failure.index).collect();
            self.photos.retain_indices(&keep);
            self.transition(WizardPhase::Failed {
                claim_id: Some(claim_id),
            });
            return Err(WizardError::PhotoUploads { claim_id, failed });
        }

        self.photos.clear();
        self.transition(WizardPhase::Submitted { claim_id });
        Ok(claim_id)
    }

    /// Dismisses a failure notice and returns to the photo step with the
    /// draft and remaining staged photos intact.
    pub fn dismiss_failure(&mut self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Failed { .. } => {
                self.transition(WizardPhase::Collecting(Step::Photos));
                Ok(())
            }
            _ => Err(WizardError::NoFailureToDismiss),
        }
    }

    /// Issues one upload per staged photo, all concurrently, and collects
    /// the failures once every upload has settled.
    async fn upload_photos(&self, claim_id: ClaimId) -> Vec<PhotoUploadFailure> {
        if self.photos.is_empty() {
            return Vec::new();
        }

        let api = Arc::clone(&self.api);
        let uploads = self
            .photos
            .iter()
            .map(|photo| api.upload_photo(claim_id, photo));
        let results = join_all(uploads).await;

        results
            .into_iter()
            .zip(self.photos.iter())
            .enumerate()
            .filter_map(|(index, (result, photo))| {
                result.err().map(|error| {
                    tracing::warn!(
                        %claim_id,
                        index,
                        file = photo.file_name(),
                        %error,
                        "photo upload failed"
                    );
                    PhotoUploadFailure {
                        index,
                        file_name: photo.file_name().to_string(),
                        error,
                    }
                })
            })
            .collect()
    }

    fn collecting_step(&self) -> Result<Step, WizardError> {
        match &self.phase {
            WizardPhase::Collecting(step) => Ok(*step),
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted { .. } => Err(WizardError::AlreadySubmitted),
            WizardPhase::Failed { .. } => Err(WizardError::FailurePending),
        }
    }

    fn transition(&mut self, next: WizardPhase) {
        debug_assert!(
            self.phase.can_transition_to(&next),
            "illegal wizard transition: {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(from = self.phase.name(), to = next.name(), "wizard transition");
        self.phase = next;
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("phase", &self.phase)
            .field("draft", &self.draft)
            .field("photos", &self.photos.len())
            .field("field_errors", &self.field_errors)
            .finish()
    }
}
