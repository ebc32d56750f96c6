//! Backend response DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Body returned by the claim-creation endpoint.
///
/// The backend sends the full claim record; only the fields the intake flow
/// consumes are modeled here, and unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimCreatedResponse {
    pub id: Uuid,
    #[serde(default)]
    pub claim_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Outcome of a health probe, including probe metadata.
///
/// A probe never fails hard: transport errors are folded into an `error`
/// status so the dashboard can render the outcome either way.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Backend-reported status, or `"error"` if the probe itself failed.
    pub status: String,
    /// Backend service name, when reported.
    pub service: Option<String>,
    /// Probe round-trip time.
    pub latency_ms: u64,
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
}

impl HealthStatus {
    /// True when the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
