//! Ports the intake domain depends on
//!
//! The wizard never talks to the network or to the rendering layer directly.
//! It is handed a [`ClaimIntakePort`] (the claims backend) and a
//! [`PreviewRegistry`] (the owner of photo-preview resources) at
//! construction, which keeps the whole flow testable with in-memory
//! implementations.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::draft::FnolSubmission;
use crate::ids::ClaimId;
use crate::photos::StagedPhoto;

/// Error type for claims-API operations.
///
/// Adapters map their transport failures into these variants so the domain
/// can classify failures without knowing the HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request did not complete in time.
    #[error("timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// A request body could not be encoded or a response body interpreted.
    #[error("malformed payload: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Creates a Connection error without an underlying source.
    pub fn connection(message: impl Into<String>) -> Self {
        ApiError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Connection { .. } | ApiError::Timeout { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Decode { .. } => false,
        }
    }
}

/// The claims backend as seen by the intake wizard.
#[async_trait]
pub trait ClaimIntakePort: Send + Sync {
    /// Creates a claim from a validated submission and returns its id.
    async fn create_claim(&self, submission: &FnolSubmission) -> Result<ClaimId, ApiError>;

    /// Attaches one photo to an already-created claim.
    async fn upload_photo(&self, claim_id: ClaimId, photo: &StagedPhoto) -> Result<(), ApiError>;
}

/// Identifier of a preview resource issued by a [`PreviewRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(Uuid);

impl PreviewId {
    /// Issues a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PreviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of photo-preview resources.
///
/// In a browser-backed rendering layer this wraps object-URL creation and
/// revocation; every acquired id must be released exactly once, which the
/// domain guarantees through [`crate::photos::PreviewHandle`].
pub trait PreviewRegistry: Send + Sync {
    /// Acquires a preview resource for the named file.
    fn acquire(&self, file_name: &str) -> PreviewId;

    /// Releases a previously acquired resource.
    fn release(&self, id: PreviewId);
}

/// A registry that issues ids and releases them into the void.
///
/// For headless use of the wizard, where no previews are rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreviewRegistry;

impl PreviewRegistry for NullPreviewRegistry {
    fn acquire(&self, _file_name: &str) -> PreviewId {
        PreviewId::new()
    }

    fn release(&self, _id: PreviewId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_and_timeout_are_transient() {
        assert!(ApiError::connection("refused").is_transient());
        assert!(ApiError::Timeout {
            operation: "create_claim".to_string(),
            duration_ms: 30_000,
        }
        .is_transient());
    }

    #[test]
    fn test_status_transience_follows_status_class() {
        assert!(ApiError::status(503, "unavailable").is_transient());
        assert!(ApiError::status(429, "slow down").is_transient());
        assert!(!ApiError::status(422, "validation failed").is_transient());
        assert!(!ApiError::status(404, "no such claim").is_transient());
    }

    #[test]
    fn test_decode_is_not_transient() {
        assert!(!ApiError::decode("missing id field").is_transient());
    }
}
