/// Service layer for the thumbnail pipeline
///
/// This module provides:
/// - Storage: object store access behind the `ObjectStore` trait
/// - Thumbnail: the finalize-event handler and its collaborators
pub mod storage;
pub mod thumbnail;

pub use storage::{GcsClient, ObjectStore};
pub use thumbnail::{ImageConverter, MagickConverter, ThumbnailGenerator, ThumbnailOutcome};
