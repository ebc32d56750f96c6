//! Claim draft and submission payload

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{validate_draft, FieldError};

/// The fields collected by the intake wizard.
///
/// Addressing fields through an enum lets the step controller and validation
/// operate on field *sets* instead of hard-coding struct access, and keeps
/// the wire names in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    PolicyNumber,
    ClaimantName,
    ClaimantEmail,
    ClaimantPhone,
    IncidentDate,
    IncidentLocation,
    IncidentDescription,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    VehicleVin,
}

impl DraftField {
    /// All draft fields, in form order.
    pub const ALL: [DraftField; 11] = [
        DraftField::PolicyNumber,
        DraftField::ClaimantName,
        DraftField::ClaimantEmail,
        DraftField::ClaimantPhone,
        DraftField::IncidentDate,
        DraftField::IncidentLocation,
        DraftField::IncidentDescription,
        DraftField::VehicleYear,
        DraftField::VehicleMake,
        DraftField::VehicleModel,
        DraftField::VehicleVin,
    ];

    /// Wire/form name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::PolicyNumber => "policy_number",
            DraftField::ClaimantName => "claimant_name",
            DraftField::ClaimantEmail => "claimant_email",
            DraftField::ClaimantPhone => "claimant_phone",
            DraftField::IncidentDate => "incident_date",
            DraftField::IncidentLocation => "incident_location",
            DraftField::IncidentDescription => "incident_description",
            DraftField::VehicleYear => "vehicle_year",
            DraftField::VehicleMake => "vehicle_make",
            DraftField::VehicleModel => "vehicle_model",
            DraftField::VehicleVin => "vehicle_vin",
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::PolicyNumber => "Policy number",
            DraftField::ClaimantName => "Claimant name",
            DraftField::ClaimantEmail => "Claimant email",
            DraftField::ClaimantPhone => "Claimant phone",
            DraftField::IncidentDate => "Incident date",
            DraftField::IncidentLocation => "Incident location",
            DraftField::IncidentDescription => "Incident description",
            DraftField::VehicleYear => "Vehicle year",
            DraftField::VehicleMake => "Vehicle make",
            DraftField::VehicleModel => "Vehicle model",
            DraftField::VehicleVin => "Vehicle VIN",
        }
    }

    /// Whether the field must be populated before submission.
    pub fn is_required(&self) -> bool {
        !matches!(self, DraftField::VehicleVin)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The in-progress FNOL form state.
///
/// Every field holds the raw text exactly as entered; typing and parsing
/// happen at conversion to [`FnolSubmission`]. Created empty when the wizard
/// mounts and discarded on successful submission or abandonment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimDraft {
    policy_number: String,
    claimant_name: String,
    claimant_email: String,
    claimant_phone: String,
    incident_date: String,
    incident_location: String,
    incident_description: String,
    vehicle_year: String,
    vehicle_make: String,
    vehicle_model: String,
    vehicle_vin: String,
}

impl ClaimDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::PolicyNumber => &self.policy_number,
            DraftField::ClaimantName => &self.claimant_name,
            DraftField::ClaimantEmail => &self.claimant_email,
            DraftField::ClaimantPhone => &self.claimant_phone,
            DraftField::IncidentDate => &self.incident_date,
            DraftField::IncidentLocation => &self.incident_location,
            DraftField::IncidentDescription => &self.incident_description,
            DraftField::VehicleYear => &self.vehicle_year,
            DraftField::VehicleMake => &self.vehicle_make,
            DraftField::VehicleModel => &self.vehicle_model,
            DraftField::VehicleVin => &self.vehicle_vin,
        }
    }

    /// Overwrites the raw value of a field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            DraftField::PolicyNumber => &mut self.policy_number,
            DraftField::ClaimantName => &mut self.claimant_name,
            DraftField::ClaimantEmail => &mut self.claimant_email,
            DraftField::ClaimantPhone => &mut self.claimant_phone,
            DraftField::IncidentDate => &mut self.incident_date,
            DraftField::IncidentLocation => &mut self.incident_location,
            DraftField::IncidentDescription => &mut self.incident_description,
            DraftField::VehicleYear => &mut self.vehicle_year,
            DraftField::VehicleMake => &mut self.vehicle_make,
            DraftField::VehicleModel => &mut self.vehicle_model,
            DraftField::VehicleVin => &mut self.vehicle_vin,
        };
        *slot = value;
    }
}

/// The validated claim-creation payload.
///
/// Produced from a [`ClaimDraft`] once every required field validates; field
/// names match the backend claim schema. An empty VIN is sent as absent
/// rather than as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnolSubmission {
    pub policy_number: String,
    pub claimant_name: String,
    pub claimant_email: String,
    pub claimant_phone: String,
    pub incident_date: String,
    pub incident_location: String,
    pub incident_description: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_vin: Option<String>,
}

impl TryFrom<&ClaimDraft> for FnolSubmission {
    type Error = Vec<FieldError>;

    fn try_from(draft: &ClaimDraft) -> Result<Self, Self::Error> {
        let errors = validate_draft(draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        let text = |field: DraftField| draft.get(field).trim().to_string();
        let vin = draft.get(DraftField::VehicleVin).trim();

        Ok(Self {
            policy_number: text(DraftField::PolicyNumber),
            claimant_name: text(DraftField::ClaimantName),
            claimant_email: text(DraftField::ClaimantEmail),
            claimant_phone: text(DraftField::ClaimantPhone),
            incident_date: text(DraftField::IncidentDate),
            incident_location: text(DraftField::IncidentLocation),
            incident_description: text(DraftField::IncidentDescription),
            // Parse cannot fail here: validate_draft already checked it.
            vehicle_year: text(DraftField::VehicleYear).parse().map_err(|_| {
                vec![FieldError::new(
                    DraftField::VehicleYear,
                    "Vehicle year must be a whole number",
                )]
            })?,
            vehicle_make: text(DraftField::VehicleMake),
            vehicle_model: text(DraftField::VehicleModel),
            vehicle_vin: (!vin.is_empty()).then(|| vin.to_string()),
        })
    }
}
