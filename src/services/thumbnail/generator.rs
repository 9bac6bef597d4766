//! The finalize-event handler
//!
//! One invocation per event, strictly sequential: gate checks, then
//! download -> convert -> upload, with invocation-local scratch storage.
//! There is no retry and no partial-success state; any step failure fails
//! the whole invocation.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::StorageObjectEvent;
use crate::services::storage::ObjectStore;

use super::convert::ImageConverter;
use super::path::{
    is_thumbnail_basename, split_object_path, thumbnail_object_path, SOURCE_MARKER_KEY,
};
use super::scratch::ScratchDir;

/// Terminal result of one finalize-event invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    /// A gate short-circuited; nothing was downloaded, converted, or uploaded
    Skipped(SkipReason),
    /// A thumbnail was uploaded at the derived path
    Generated { thumbnail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAnImage,
    AlreadyThumbnail,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAnImage => "not-an-image",
            SkipReason::AlreadyThumbnail => "already-thumbnail",
        }
    }
}

/// Stateless handler producing one thumbnail per object-finalize event.
///
/// The object store, the converter, and the scratch root are injected at
/// construction; tests substitute fakes through the same constructor.
pub struct ThumbnailGenerator {
    store: Arc<dyn ObjectStore>,
    converter: Arc<dyn ImageConverter>,
    scratch_root: PathBuf,
}

impl ThumbnailGenerator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        converter: Arc<dyn ImageConverter>,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            store,
            converter,
            scratch_root,
        }
    }

    /// Handle one object-finalize event.
    ///
    /// Non-image objects and objects that already are thumbnails (reserved
    /// `thumb_` prefix or the source marker in their metadata) terminate as
    /// no-op successes. Everything else runs the full pipeline; the scratch
    /// directory is removed on every exit path.
    pub async fn handle(&self, event: &StorageObjectEvent) -> Result<ThumbnailOutcome> {
        debug!(
            bucket = %event.bucket,
            object = %event.name,
            resource_state = ?event.resource_state,
            metageneration = ?event.metageneration,
            "Finalize event received"
        );

        if !event.content_type.starts_with("image/") {
            info!(object = %event.name, content_type = %event.content_type, "Not an image, skipping");
            return Ok(ThumbnailOutcome::Skipped(SkipReason::NotAnImage));
        }

        if is_thumbnail_basename(&event.name) || event.metadata.contains_key(SOURCE_MARKER_KEY) {
            info!(object = %event.name, "Already a thumbnail, skipping");
            return Ok(ThumbnailOutcome::Skipped(SkipReason::AlreadyThumbnail));
        }

        let (_, basename) = split_object_path(&event.name);
        let scratch = ScratchDir::create(&self.scratch_root).await?;
        let local_path = scratch.file_path(basename);

        let data = self.store.download(&event.bucket, &event.name).await?;
        tokio::fs::write(&local_path, &data).await?;
        info!(
            object = %event.name,
            size = data.len(),
            local = %local_path.display(),
            "Image downloaded locally"
        );

        self.converter.thumbnail(&local_path, &local_path).await?;
        info!(object = %event.name, "Thumbnail created");

        let thumbnail = thumbnail_object_path(&event.name);
        let resized = Bytes::from(tokio::fs::read(&local_path).await?);
        self.store
            .upload(
                &event.bucket,
                &thumbnail,
                resized,
                &event.content_type,
                &[(SOURCE_MARKER_KEY.to_string(), event.name.clone())],
            )
            .await?;

        scratch.remove().await;

        info!(object = %event.name, thumbnail = %thumbnail, "Thumbnail uploaded");
        Ok(ThumbnailOutcome::Generated { thumbnail })
    }
}
