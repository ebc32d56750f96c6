//! Wizard steps and their required field sets

use serde::{Deserialize, Serialize};

use crate::draft::DraftField;

/// One of the four intake steps, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Policy and claimant identity (step 1)
    Policy,
    /// Incident details (step 2)
    Incident,
    /// Vehicle details (step 3)
    Vehicle,
    /// Damage photos (step 4, no required fields)
    Photos,
}

impl Step {
    /// The step shown when the wizard mounts.
    pub const FIRST: Step = Step::Policy;

    /// The final step, from which submission is available.
    pub const LAST: Step = Step::Photos;

    /// 1-based position, as displayed to the claimant.
    pub fn number(&self) -> u8 {
        match self {
            Step::Policy => 1,
            Step::Incident => 2,
            Step::Vehicle => 3,
            Step::Photos => 4,
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Policy => Some(Step::Incident),
            Step::Incident => Some(Step::Vehicle),
            Step::Vehicle => Some(Step::Photos),
            Step::Photos => None,
        }
    }

    /// The preceding step, if any.
    pub fn prev(&self) -> Option<Step> {
        match self {
            Step::Policy => None,
            Step::Incident => Some(Step::Policy),
            Step::Vehicle => Some(Step::Incident),
            Step::Photos => Some(Step::Vehicle),
        }
    }

    /// The fields that must validate before this step can be left forward.
    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            Step::Policy => &[
                DraftField::PolicyNumber,
                DraftField::ClaimantName,
                DraftField::ClaimantEmail,
                DraftField::ClaimantPhone,
            ],
            Step::Incident => &[
                DraftField::IncidentDate,
                DraftField::IncidentLocation,
                DraftField::IncidentDescription,
            ],
            Step::Vehicle => &[
                DraftField::VehicleYear,
                DraftField::VehicleMake,
                DraftField::VehicleModel,
            ],
            Step::Photos => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_is_linear() {
        assert_eq!(Step::FIRST.next(), Some(Step::Incident));
        assert_eq!(Step::Incident.next(), Some(Step::Vehicle));
        assert_eq!(Step::Vehicle.next(), Some(Step::Photos));
        assert_eq!(Step::LAST.next(), None);

        assert_eq!(Step::FIRST.prev(), None);
        assert_eq!(Step::Photos.prev(), Some(Step::Vehicle));
    }

    #[test]
    fn test_step_numbers_span_one_to_four() {
        assert_eq!(Step::Policy.number(), 1);
        assert_eq!(Step::Photos.number(), 4);
    }

    #[test]
    fn test_photo_step_has_no_required_fields() {
        assert!(Step::Photos.required_fields().is_empty());
    }

    #[test]
    fn test_required_fields_cover_all_required_draft_fields() {
        let mut covered: Vec<DraftField> = Vec::new();
        for step in [Step::Policy, Step::Incident, Step::Vehicle, Step::Photos] {
            covered.extend_from_slice(step.required_fields());
        }

        for field in DraftField::ALL {
            assert_eq!(covered.contains(&field), field.is_required());
        }
    }
}
