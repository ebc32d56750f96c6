//! Photo staging
//!
//! Photos are staged in memory until submission. Each staged photo owns
//! exactly one preview handle; the handle releases its registry resource on
//! drop, so removal, successful upload, and wizard teardown all share the
//! same release path.

use std::fmt;
use std::sync::Arc;

use crate::ports::{PreviewId, PreviewRegistry};

/// RAII guard over a preview resource.
///
/// Not cloneable: one staged photo, one handle, one release.
pub struct PreviewHandle {
    id: PreviewId,
    registry: Arc<dyn PreviewRegistry>,
}

impl PreviewHandle {
    pub(crate) fn acquire(registry: Arc<dyn PreviewRegistry>, file_name: &str) -> Self {
        let id = registry.acquire(file_name);
        Self { id, registry }
    }

    /// The registry-issued preview id, for the rendering layer.
    pub fn id(&self) -> PreviewId {
        self.id
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle").field("id", &self.id).finish()
    }
}

/// One photo staged for upload.
#[derive(Debug)]
pub struct StagedPhoto {
    file_name: String,
    content_type: String,
    content: Vec<u8>,
    preview: PreviewHandle,
}

impl StagedPhoto {
    pub(crate) fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
        preview: PreviewHandle,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            content,
            preview,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn preview_id(&self) -> PreviewId {
        self.preview.id()
    }
}

/// Ordered set of staged photos.
///
/// Invariant: the number of live preview handles always equals the number of
/// entries, because handles live inside the entries.
#[derive(Debug, Default)]
pub struct PhotoSet {
    entries: Vec<StagedPhoto>,
}

impl PhotoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StagedPhoto> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedPhoto> {
        self.entries.iter()
    }

    pub(crate) fn push(&mut self, photo: StagedPhoto) -> usize {
        self.entries.push(photo);
        self.entries.len() - 1
    }

    /// Removes the photo at `index`, releasing its preview handle.
    pub(crate) fn remove(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            // Dropping the entry drops its PreviewHandle.
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    /// Keeps only the entries at the given indices, in order.
    ///
    /// Used after a partially failed upload phase to unstage the photos that
    /// made it to the backend.
    pub(crate) fn retain_indices(&mut self, keep: &[usize]) {
        let mut index = 0;
        self.entries.retain(|_| {
            let kept = keep.contains(&index);
            index += 1;
            kept
        });
    }

    /// Drops every entry, releasing all preview handles.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
