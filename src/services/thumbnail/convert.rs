//! External image conversion
//!
//! Resampling is delegated to ImageMagick: the handler spawns `convert` and
//! waits for it to exit. The `ImageConverter` trait is the seam tests use to
//! substitute a recording fake.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, Result};

/// Fixed target geometry: fit within 200x200 preserving aspect ratio, never
/// upscale (the ImageMagick `>` qualifier)
pub const THUMBNAIL_GEOMETRY: &str = "200x200>";

#[async_trait::async_trait]
pub trait ImageConverter: Send + Sync {
    /// Produce a shrink-to-fit thumbnail of `input` at `output`; the two
    /// paths may be identical (in-place conversion)
    async fn thumbnail(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Converter invoking the ImageMagick `convert` binary
pub struct MagickConverter {
    convert_bin: String,
}

impl MagickConverter {
    pub fn new(convert_bin: impl Into<String>) -> Self {
        Self {
            convert_bin: convert_bin.into(),
        }
    }
}

#[async_trait::async_trait]
impl ImageConverter for MagickConverter {
    async fn thumbnail(&self, input: &Path, output: &Path) -> Result<()> {
        debug!(input = %input.display(), geometry = THUMBNAIL_GEOMETRY, "Running convert");

        let result = Command::new(&self.convert_bin)
            .arg(input)
            .arg("-thumbnail")
            .arg(THUMBNAIL_GEOMETRY)
            .arg(output)
            .output()
            .await
            .map_err(|e| {
                AppError::Convert(format!("failed to run {}: {e}", self.convert_bin))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(AppError::Convert(format!(
                "{} exited with {}: {}",
                self.convert_bin,
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
