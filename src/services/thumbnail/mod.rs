//! Thumbnail generation pipeline
//!
//! This module provides the finalize-event handler and its collaborators:
//! - Generator: gate checks and the download/convert/upload sequence
//! - Converter: external ImageMagick invocation behind a trait seam
//! - Path rules: the `thumb_` naming contract and the metadata marker
//! - Scratch: invocation-local working directories

pub mod convert;
pub mod generator;
pub mod path;
pub mod scratch;

pub use convert::{ImageConverter, MagickConverter, THUMBNAIL_GEOMETRY};
pub use generator::{SkipReason, ThumbnailGenerator, ThumbnailOutcome};
pub use path::{thumbnail_object_path, SOURCE_MARKER_KEY, THUMB_PREFIX};
pub use scratch::ScratchDir;
