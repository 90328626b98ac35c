use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Handle to a locally cached photo that has not been uploaded yet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(PathBuf);

impl ImageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Device photo library access. Each selection yields zero or one handle.
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    /// `None` means the user cancelled the picker
    async fn select_image(&self) -> Option<ImageHandle>;
}

/// Photo library fed from a list of files, handing out one per selection
#[derive(Debug, Default)]
pub struct QueuedPhotoLibrary {
    pending: Mutex<VecDeque<PathBuf>>,
}

impl QueuedPhotoLibrary {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            pending: Mutex::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[async_trait]
impl PhotoLibrary for QueuedPhotoLibrary {
    async fn request_permission(&self) -> PermissionStatus {
        let next = self.pending.lock().await.front().cloned();
        let Some(path) = next else {
            return PermissionStatus::Granted;
        };

        match tokio::fs::File::open(&path).await {
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::warn!(path = %path.display(), "Photo access denied");
                PermissionStatus::Denied
            }
            _ => PermissionStatus::Granted,
        }
    }

    async fn select_image(&self) -> Option<ImageHandle> {
        self.pending.lock().await.pop_front().map(ImageHandle::new)
    }
}
