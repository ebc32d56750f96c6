//! In-memory Port Mocks
//!
//! Recording implementations of the domain ports for tests that need to
//! observe the submission protocol without a network.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use domain_intake::{
    ApiError, ClaimId, ClaimIntakePort, FnolSubmission, PreviewId, PreviewRegistry, StagedPhoto,
};

use crate::fixtures::IdFixtures;

/// A claims backend that records every call and fails on demand.
///
/// Uploads sleep briefly while holding an in-flight counter, so tests can
/// assert that the wizard really fans uploads out concurrently.
pub struct RecordingIntakePort {
    claim_id: ClaimId,
    created: Mutex<Vec<FnolSubmission>>,
    uploads: Mutex<Vec<(ClaimId, String)>>,
    fail_create: AtomicBool,
    failing_uploads: Mutex<HashSet<String>>,
    upload_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for RecordingIntakePort {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingIntakePort {
    pub fn new() -> Self {
        Self {
            claim_id: IdFixtures::claim_id(),
            created: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
            failing_uploads: Mutex::new(HashSet::new()),
            upload_delay: Duration::from_millis(10),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Makes every claim creation fail with a connection error.
    pub fn fail_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    /// Restores claim creation after [`fail_create`](Self::fail_create).
    pub fn allow_create(&self) {
        self.fail_create.store(false, Ordering::SeqCst);
    }

    /// Makes uploads of the named file fail with a 500.
    pub fn fail_upload(&self, file_name: impl Into<String>) {
        self.failing_uploads
            .lock()
            .expect("mock lock poisoned")
            .insert(file_name.into());
    }

    /// Restores uploads of the named file.
    pub fn allow_upload(&self, file_name: &str) {
        self.failing_uploads
            .lock()
            .expect("mock lock poisoned")
            .remove(file_name);
    }

    /// The claim id this backend hands out.
    pub fn issued_claim_id(&self) -> ClaimId {
        self.claim_id
    }

    /// Submissions received by the creation endpoint, in order.
    pub fn created(&self) -> Vec<FnolSubmission> {
        self.created.lock().expect("mock lock poisoned").clone()
    }

    /// Successful uploads as (claim id, file name) pairs.
    pub fn uploads(&self) -> Vec<(ClaimId, String)> {
        self.uploads.lock().expect("mock lock poisoned").clone()
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().expect("mock lock poisoned").len()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().expect("mock lock poisoned").len()
    }

    /// The largest number of uploads that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClaimIntakePort for RecordingIntakePort {
    async fn create_claim(&self, submission: &FnolSubmission) -> Result<ClaimId, ApiError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::connection("connection refused"));
        }
        self.created
            .lock()
            .expect("mock lock poisoned")
            .push(submission.clone());
        Ok(self.claim_id)
    }

    async fn upload_photo(&self, claim_id: ClaimId, photo: &StagedPhoto) -> Result<(), ApiError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(self.upload_delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failing = self
            .failing_uploads
            .lock()
            .expect("mock lock poisoned")
            .contains(photo.file_name());
        if failing {
            return Err(ApiError::status(500, "photo store unavailable"));
        }

        self.uploads
            .lock()
            .expect("mock lock poisoned")
            .push((claim_id, photo.file_name().to_string()));
        Ok(())
    }
}

/// A preview registry that counts acquisitions and releases.
#[derive(Default)]
pub struct CountingPreviewRegistry {
    acquired: Mutex<Vec<PreviewId>>,
    released: Mutex<HashMap<PreviewId, usize>>,
}

impl CountingPreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired_count(&self) -> usize {
        self.acquired.lock().expect("mock lock poisoned").len()
    }

    pub fn released_count(&self) -> usize {
        self.released
            .lock()
            .expect("mock lock poisoned")
            .values()
            .sum()
    }

    /// Handles acquired but not yet released.
    pub fn live_count(&self) -> usize {
        self.acquired_count() - self.released_count()
    }

    /// How many times the given id was released. Anything above one is a
    /// double-release bug in the caller.
    pub fn times_released(&self, id: PreviewId) -> usize {
        self.released
            .lock()
            .expect("mock lock poisoned")
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    /// True when every acquired handle was released exactly once.
    pub fn fully_released(&self) -> bool {
        let acquired = self.acquired.lock().expect("mock lock poisoned");
        let released = self.released.lock().expect("mock lock poisoned");
        acquired.len() == released.len() && released.values().all(|&count| count == 1)
    }
}

impl PreviewRegistry for CountingPreviewRegistry {
    fn acquire(&self, _file_name: &str) -> PreviewId {
        let id = PreviewId::new();
        self.acquired.lock().expect("mock lock poisoned").push(id);
        id
    }

    fn release(&self, id: PreviewId) {
        *self
            .released
            .lock()
            .expect("mock lock poisoned")
            .entry(id)
            .or_insert(0) += 1;
    }
}
