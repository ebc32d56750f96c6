//! HTTP client for the claims backend
//!
//! Implements [`ClaimIntakePort`] over REST: claim creation as JSON,
//! photo upload as multipart form content under the field name `file`.
//! Transport and status failures are mapped onto [`ApiError`] so the domain
//! stays ignorant of the HTTP client.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart;
use std::time::{Duration, Instant};

use domain_intake::{ApiError, ClaimId, ClaimIntakePort, FnolSubmission, StagedPhoto};

use crate::config::ClientConfig;
use crate::dto::{ClaimCreatedResponse, HealthResponse, HealthStatus};

/// Claims-backend client.
#[derive(Debug, Clone)]
pub struct IntakeApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl IntakeApiClient {
    /// Builds a client with connection pooling and the configured timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ApiError::Connection {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(err)),
            })?;

        Ok(Self { http, config })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.api_url
    }

    /// Probes `GET /health`.
    ///
    /// Never returns an error: a failed probe yields an `error`-status
    /// [`HealthStatus`], which is what the surrounding screens display.
    pub async fn check_health(&self) -> HealthStatus {
        let url = self.config.endpoint("/health");
        let start = Instant::now();

        let outcome = async {
            let response = self.http.get(&url).send().await?;
            response.error_for_status()?.json::<HealthResponse>().await
        }
        .await;

        let latency_ms = start.elapsed().as_millis() as u64;
        match outcome {
            Ok(body) => HealthStatus {
                status: body.status,
                service: body.service,
                latency_ms,
                checked_at: Utc::now(),
            },
            Err(error) => {
                tracing::warn!(%error, "backend health check failed");
                HealthStatus {
                    status: "error".to_string(),
                    service: None,
                    latency_ms,
                    checked_at: Utc::now(),
                }
            }
        }
    }

    fn transport_error(&self, operation: &'static str, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else if err.is_decode() {
            ApiError::decode(err.to_string())
        } else {
            ApiError::Connection {
                message: format!("{operation} request failed"),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Rejects non-success statuses, folding the response body into the error.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };
    Err(ApiError::status(status.as_u16(), message))
}

#[async_trait]
impl ClaimIntakePort for IntakeApiClient {
    async fn create_claim(&self, submission: &FnolSubmission) -> Result<ClaimId, ApiError> {
        let url = self.config.endpoint("/api/v1/claims");
        tracing::debug!(%url, "creating claim");

        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|err| self.transport_error("create_claim", err))?;
        let response = ensure_success(response).await?;

        let created: ClaimCreatedResponse = response
            .json()
            .await
            .map_err(|err| ApiError::decode(format!("claim-creation response: {err}")))?;

        tracing::info!(claim_id = %created.id, "claim created");
        Ok(ClaimId::from(created.id))
    }

    async fn upload_photo(&self, claim_id: ClaimId, photo: &StagedPhoto) -> Result<(), ApiError> {
        let url = self
            .config
            .endpoint(&format!("/api/v1/claims/{}/photos", claim_id.as_uuid()));

        let part = multipart::Part::bytes(photo.content().to_vec())
            .file_name(photo.file_name().to_string())
            .mime_str(photo.content_type())
            .map_err(|err| ApiError::decode(format!("photo content type: {err}")))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| self.transport_error("upload_photo", err))?;
        ensure_success(response).await?;

        tracing::debug!(%claim_id, file = photo.file_name(), "photo uploaded");
        Ok(())
    }
}
