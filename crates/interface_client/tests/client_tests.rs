//! Adapter tests against an in-process stub backend.
//!
//! The stub is a small axum router that mimics the claims API surface the
//! client talks to: JSON claim creation, multipart photo upload, and the
//! health endpoint, with injectable failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use domain_intake::{ApiError, ClaimIntakePort, DraftField, NullPreviewRegistry, Wizard};
use interface_client::{ClientConfig, IntakeApiClient};
use test_utils::{DraftBuilder, FieldFixtures, PhotoFixtures};

#[derive(Default)]
struct StubInner {
    claim_id: Uuid,
    claims: Mutex<Vec<Value>>,
    photos: Mutex<Vec<(Uuid, String, usize)>>,
    fail_create: AtomicBool,
    fail_uploads: AtomicBool,
    fail_health: AtomicBool,
}

type Stub = Arc<StubInner>;

async fn health(State(stub): State<Stub>) -> Result<Json<Value>, StatusCode> {
    if stub.fail_health.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "status": "healthy",
        "service": "widle-insure-backend",
    })))
}

async fn create_claim(
    State(stub): State<Stub>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if stub.fail_create.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    stub.claims.lock().expect("stub lock").push(body);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": stub.claim_id,
            "claim_number": "CLM-100042",
            "status": "fnol",
        })),
    ))
}

async fn upload_photo(
    State(stub): State<Stub>,
    Path(claim_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<StatusCode, StatusCode> {
    if stub.fail_uploads.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            stub.photos
                .lock()
                .expect("stub lock")
                .push((claim_id, file_name, bytes.len()));
            return Ok(StatusCode::CREATED);
        }
    }
    Err(StatusCode::UNPROCESSABLE_ENTITY)
}

/// Binds the stub on an ephemeral port and returns its state and a client
/// configured against it.
async fn spawn_stub() -> Result<(Stub, IntakeApiClient)> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let stub: Stub = Arc::new(StubInner {
        claim_id: Uuid::new_v4(),
        ..StubInner::default()
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/claims", post(create_claim))
        .route("/api/v1/claims/:id/photos", post(upload_photo))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app).await {
            eprintln!("stub backend stopped: {error}");
        }
    });

    let config = ClientConfig {
        api_url: format!("http://{addr}"),
        timeout_secs: 5,
    };
    let client = IntakeApiClient::new(config)?;
    Ok((stub, client))
}

fn staged_photo_wizard(client: IntakeApiClient) -> Wizard {
    Wizard::new(Arc::new(client), Arc::new(NullPreviewRegistry))
}

#[tokio::test]
async fn test_create_claim_posts_the_submission_and_returns_the_id() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    let submission = DraftBuilder::complete().build_submission();

    let claim_id = client.create_claim(&submission).await?;

    assert_eq!(*claim_id.as_uuid(), stub.claim_id);
    let recorded = stub.claims.lock().expect("stub lock").clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0]["policy_number"], FieldFixtures::policy_number());
    assert_eq!(recorded[0]["vehicle_year"], 2019);
    assert!(recorded[0].get("vehicle_vin").is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_claim_maps_server_failure_to_status_error() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    stub.fail_create.store(true, Ordering::SeqCst);
    let submission = DraftBuilder::complete().build_submission();

    let error = client.create_claim(&submission).await.unwrap_err();

    match &error {
        ApiError::Status { status, .. } => assert_eq!(*status, 503),
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(error.is_transient());
    Ok(())
}

#[tokio::test]
async fn test_create_claim_maps_refused_connection_to_connection_error() -> Result<()> {
    // Bind and immediately drop a listener so the port is known-dead.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = IntakeApiClient::new(ClientConfig {
        api_url: format!("http://{addr}"),
        timeout_secs: 2,
    })?;
    let submission = DraftBuilder::complete().build_submission();

    let error = client.create_claim(&submission).await.unwrap_err();

    assert!(matches!(error, ApiError::Connection { .. }));
    assert!(error.is_transient());
    Ok(())
}

#[tokio::test]
async fn test_upload_photo_sends_multipart_under_the_file_field() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    let mut wizard = staged_photo_wizard(client.clone());
    wizard
        .stage_photo(
            PhotoFixtures::file_name(0),
            PhotoFixtures::content_type(),
            PhotoFixtures::jpeg_bytes(),
        )
        .unwrap();

    let claim_id = domain_intake::ClaimId::from(stub.claim_id);
    client
        .upload_photo(claim_id, wizard.photos().get(0).unwrap())
        .await?;

    let photos = stub.photos.lock().expect("stub lock").clone();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].0, stub.claim_id);
    assert_eq!(photos[0].1, PhotoFixtures::file_name(0));
    assert_eq!(photos[0].2, PhotoFixtures::jpeg_bytes().len());
    Ok(())
}

#[tokio::test]
async fn test_upload_photo_maps_server_failure_to_status_error() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    stub.fail_uploads.store(true, Ordering::SeqCst);
    let mut wizard = staged_photo_wizard(client.clone());
    wizard
        .stage_photo(
            PhotoFixtures::file_name(0),
            PhotoFixtures::content_type(),
            PhotoFixtures::jpeg_bytes(),
        )
        .unwrap();

    let error = client
        .upload_photo(
            domain_intake::ClaimId::from(stub.claim_id),
            wizard.photos().get(0).unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Status { status: 500, .. }));
    Ok(())
}

#[tokio::test]
async fn test_health_probe_reports_the_backend_status() -> Result<()> {
    let (_stub, client) = spawn_stub().await?;

    let health = client.check_health().await;

    assert!(health.is_healthy());
    assert_eq!(health.service.as_deref(), Some("widle-insure-backend"));
    Ok(())
}

#[tokio::test]
async fn test_health_probe_folds_failures_into_an_error_status() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    stub.fail_health.store(true, Ordering::SeqCst);

    let health = client.check_health().await;

    assert!(!health.is_healthy());
    assert_eq!(health.status, "error");
    Ok(())
}

#[tokio::test]
async fn test_health_probe_survives_an_unreachable_backend() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = IntakeApiClient::new(ClientConfig {
        api_url: format!("http://{addr}"),
        timeout_secs: 2,
    })?;

    let health = client.check_health().await;
    assert_eq!(health.status, "error");
    Ok(())
}

/// Full protocol through the real adapter: fill the form, stage two photos,
/// submit, and verify what reached the backend.
#[tokio::test]
async fn test_wizard_submits_end_to_end_through_the_http_adapter() -> Result<()> {
    let (stub, client) = spawn_stub().await?;
    let mut wizard = staged_photo_wizard(client);

    for step in [
        domain_intake::Step::Policy,
        domain_intake::Step::Incident,
        domain_intake::Step::Vehicle,
    ] {
        for &field in step.required_fields() {
            let value = match field {
                DraftField::PolicyNumber => FieldFixtures::policy_number(),
                DraftField::ClaimantName => FieldFixtures::claimant_name(),
                DraftField::ClaimantEmail => FieldFixtures::claimant_email(),
                DraftField::ClaimantPhone => FieldFixtures::claimant_phone(),
                DraftField::IncidentDate => FieldFixtures::incident_date(),
                DraftField::IncidentLocation => FieldFixtures::incident_location(),
                DraftField::IncidentDescription => FieldFixtures::incident_description(),
                DraftField::VehicleYear => FieldFixtures::vehicle_year(),
                DraftField::VehicleMake => FieldFixtures::vehicle_make(),
                DraftField::VehicleModel => FieldFixtures::vehicle_model(),
                DraftField::VehicleVin => FieldFixtures::vehicle_vin(),
            };
            wizard.set_field(field, value).unwrap();
        }
        wizard.advance().unwrap();
    }
    for index in 0..2 {
        wizard
            .stage_photo(
                PhotoFixtures::file_name(index),
                PhotoFixtures::content_type(),
                PhotoFixtures::jpeg_bytes(),
            )
            .unwrap();
    }

    let claim_id = wizard.submit().await.expect("submission should succeed");

    assert_eq!(*claim_id.as_uuid(), stub.claim_id);
    assert_eq!(stub.claims.lock().expect("stub lock").len(), 1);
    let photos = stub.photos.lock().expect("stub lock").clone();
    assert_eq!(photos.len(), 2);
    assert!(photos.iter().all(|(id, _, _)| *id == stub.claim_id));
    Ok(())
}
