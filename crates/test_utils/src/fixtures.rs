//! Pre-built Test Fixtures
//!
//! Ready-to-use, deterministic test data for the intake flow. Keeping the
//! values in one place makes the assertions in the suites predictable.

use uuid::Uuid;

use domain_intake::ClaimId;

/// Fixture for form field values
pub struct FieldFixtures;

impl FieldFixtures {
    pub fn policy_number() -> &'static str {
        "POL-2024-0042"
    }

    pub fn claimant_name() -> &'static str {
        "Dana Whitfield"
    }

    pub fn claimant_email() -> &'static str {
        "dana.whitfield@example.com"
    }

    pub fn claimant_phone() -> &'static str {
        "+1-555-0142"
    }

    pub fn incident_date() -> &'static str {
        "2024-05-14T09:30:00Z"
    }

    pub fn incident_location() -> &'static str {
        "I-80 westbound, mile marker 42"
    }

    pub fn incident_description() -> &'static str {
        "Rear-ended while stopped at a red light; rear bumper and trunk damaged"
    }

    pub fn vehicle_year() -> &'static str {
        "2019"
    }

    pub fn vehicle_make() -> &'static str {
        "Subaru"
    }

    pub fn vehicle_model() -> &'static str {
        "Outback"
    }

    pub fn vehicle_vin() -> &'static str {
        "4S4BSANC5K3312345"
    }
}

/// Fixture for staged photos
pub struct PhotoFixtures;

impl PhotoFixtures {
    /// A minimal JPEG payload (SOI marker plus padding), enough to exercise
    /// multipart uploads without shipping a real image.
    pub fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(&[0x00; 16]);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    pub fn content_type() -> &'static str {
        "image/jpeg"
    }

    pub fn file_name(index: usize) -> String {
        format!("damage-{index}.jpg")
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// A fixed claim id, for assertions that compare against the id the
    /// mock backend hands out.
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::from_u128(0x4242_4242_4242_4242_4242_4242_4242_4242))
    }

    /// A fresh random claim id.
    pub fn random_claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::new_v4())
    }
}
