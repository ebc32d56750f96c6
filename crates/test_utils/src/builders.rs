//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use domain_intake::{ClaimDraft, DraftField, FnolSubmission};

use crate::fixtures::FieldFixtures;

/// Builder for claim drafts.
pub struct DraftBuilder {
    draft: ClaimDraft,
}

impl Default for DraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftBuilder {
    /// Starts from an empty draft, as the wizard does on mount.
    pub fn new() -> Self {
        Self {
            draft: ClaimDraft::new(),
        }
    }

    /// Starts from a draft with every required field populated from the
    /// fixtures (VIN left empty, since it is optional).
    pub fn complete() -> Self {
        let mut draft = ClaimDraft::new();
        draft.set(DraftField::PolicyNumber, FieldFixtures::policy_number());
        draft.set(DraftField::ClaimantName, FieldFixtures::claimant_name());
        draft.set(DraftField::ClaimantEmail, FieldFixtures::claimant_email());
        draft.set(DraftField::ClaimantPhone, FieldFixtures::claimant_phone());
        draft.set(DraftField::IncidentDate, FieldFixtures::incident_date());
        draft.set(
            DraftField::IncidentLocation,
            FieldFixtures::incident_location(),
        );
        draft.set(
            DraftField::IncidentDescription,
            FieldFixtures::incident_description(),
        );
        draft.set(DraftField::VehicleYear, FieldFixtures::vehicle_year());
        draft.set(DraftField::VehicleMake, FieldFixtures::vehicle_make());
        draft.set(DraftField::VehicleModel, FieldFixtures::vehicle_model());
        Self { draft }
    }

    /// Sets a field value.
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.draft.set(field, value);
        self
    }

    /// Clears a field value.
    pub fn without(mut self, field: DraftField) -> Self {
        self.draft.set(field, "");
        self
    }

    /// Builds the draft.
    pub fn build(self) -> ClaimDraft {
        self.draft
    }

    /// Builds the draft and converts it into the wire payload.
    ///
    /// Panics if the draft does not validate; use only with complete drafts.
    pub fn build_submission(self) -> FnolSubmission {
        FnolSubmission::try_from(&self.draft).expect("draft should validate")
    }
}
