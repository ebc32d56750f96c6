//! Claimant Intake Domain
//!
//! This crate implements the First Notice of Loss (FNOL) intake flow: a
//! multi-step wizard that collects policy, incident, vehicle, and photo data
//! and submits it to the claims backend.
//!
//! # Wizard Lifecycle
//!
//! ```text
//! Collecting(Policy) <-> Collecting(Incident) <-> Collecting(Vehicle) <-> Collecting(Photos)
//!                                                                               |
//!                                                                           Submitting
//!                                                                           /        \
//!                                                              Submitted{id}          Failed{id?}
//!                                                                                     (retry / dismiss)
//! ```
//!
//! Forward navigation is gated on the active step's required fields; backward
//! navigation is unconditional. Submission is a two-phase protocol: the claim
//! is created first, then all staged photos upload concurrently against the
//! returned claim id.
//!
//! The crate is rendering-agnostic. It talks to the outside world through two
//! ports: [`ClaimIntakePort`] (the claims API) and [`PreviewRegistry`] (the
//! photo-preview resource owner). Adapters live in `interface_client`.

pub mod draft;
pub mod error;
pub mod ids;
pub mod photos;
pub mod ports;
pub mod steps;
pub mod validation;
pub mod wizard;

pub use draft::{ClaimDraft, DraftField, FnolSubmission};
pub use error::{PhotoUploadFailure, WizardError};
pub use ids::ClaimId;
pub use photos::{PhotoSet, PreviewHandle, StagedPhoto};
pub use ports::{ApiError, ClaimIntakePort, NullPreviewRegistry, PreviewId, PreviewRegistry};
pub use steps::Step;
pub use validation::{validate_draft, validate_field, validate_step, FieldError};
pub use wizard::{Wizard, WizardPhase};
