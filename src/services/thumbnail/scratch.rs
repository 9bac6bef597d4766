use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::error::Result;

/// Invocation-scoped scratch directory under the configured scratch root.
///
/// Each invocation gets a uniquely named directory, so concurrent events for
/// objects sharing a basename cannot collide on the local path. Removal is
/// guaranteed: the success path removes eagerly, the `Drop` backstop covers
/// failure paths. Removal failures are logged and never fail the invocation.
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// Create a fresh scratch directory for one invocation
    pub async fn create(root: &Path) -> Result<Self> {
        let path = root.join(format!("thumbnail-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    /// Path for a file inside the scratch directory
    pub fn file_path(&self, basename: &str) -> PathBuf {
        self.path.join(basename)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now instead of waiting for drop
    pub async fn remove(mut self) {
        self.removed = true;
        if let Err(e) = tokio::fs::remove_dir_all(&self.path).await {
            warn!(path = %self.path.display(), "Failed to remove scratch directory: {}", e);
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(path = %self.path.display(), "Failed to remove scratch directory: {}", e);
            }
        }
    }
}
