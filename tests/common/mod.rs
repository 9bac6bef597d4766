//! In-memory fakes for exercising the thumbnail pipeline without GCS or
//! ImageMagick. Every fake records its calls so tests can assert both what
//! happened and what did not.

// Shared between test binaries; not every binary touches every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bytes::Bytes;

use thumbnail_service::error::{AppError, Result};
use thumbnail_service::models::{ResourceState, StorageObjectEvent};
use thumbnail_service::services::storage::ObjectStore;
use thumbnail_service::services::thumbnail::ImageConverter;

/// One recorded upload call
#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub bucket: String,
    pub object: String,
    pub data: Vec<u8>,
    pub content_type: String,
    pub metadata: Vec<(String, String)>,
}

/// In-memory object store recording downloads and uploads
#[derive(Default)]
pub struct FakeObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    downloads: Mutex<Vec<(String, String)>>,
    uploads: Mutex<Vec<UploadedObject>>,
    fail_downloads: bool,
    fail_uploads: bool,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose downloads always fail, as if the object were missing
    pub fn failing_downloads() -> Self {
        Self {
            fail_downloads: true,
            ..Self::default()
        }
    }

    /// A store whose uploads always fail, as if writes were denied
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn put(&self, bucket: &str, object: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), object.to_string()), data.to_vec());
    }

    pub fn get(&self, bucket: &str, object: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), object.to_string()))
            .cloned()
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn last_upload(&self) -> Option<UploadedObject> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ObjectStore for FakeObjectStore {
    async fn download(&self, bucket: &str, object: &str) -> Result<Bytes> {
        self.downloads
            .lock()
            .unwrap()
            .push((bucket.to_string(), object.to_string()));

        if self.fail_downloads {
            return Err(AppError::Storage(format!(
                "download failed: {bucket}/{object}"
            )));
        }

        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), object.to_string()))
            .map(|data| Bytes::from(data.clone()))
            .ok_or_else(|| AppError::Storage(format!("object not found: {bucket}/{object}")))
    }

    async fn upload(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        content_type: &str,
        metadata: &[(String, String)],
    ) -> Result<()> {
        if self.fail_uploads {
            return Err(AppError::Storage(format!(
                "upload failed: {bucket}/{object}: permission denied"
            )));
        }

        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), object.to_string()), data.to_vec());
        self.uploads.lock().unwrap().push(UploadedObject {
            bucket: bucket.to_string(),
            object: object.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
            metadata: metadata.to_vec(),
        });
        Ok(())
    }
}

/// Converter that records invocations and rewrites the file in place,
/// prefixing its content so tests can tell converted bytes from originals
#[derive(Default)]
pub struct RecordingConverter {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl RecordingConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ImageConverter for RecordingConverter {
    async fn thumbnail(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));

        let original = tokio::fs::read(input).await?;
        let mut resized = b"resized:".to_vec();
        resized.extend_from_slice(&original);
        tokio::fs::write(output, resized).await?;
        Ok(())
    }
}

/// Converter that fails every invocation, as a non-zero subprocess exit would
#[derive(Default)]
pub struct FailingConverter {
    calls: Mutex<Vec<PathBuf>>,
}

impl FailingConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_input(&self) -> Option<PathBuf> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ImageConverter for FailingConverter {
    async fn thumbnail(&self, input: &Path, _output: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(input.to_path_buf());
        Err(AppError::Convert(
            "convert exited with exit status: 1: no decode delegate".to_string(),
        ))
    }
}

/// A fresh scratch root so each test can assert on its own directory tree
pub fn unique_scratch_root(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("thumb-test-{tag}-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&root).unwrap();
    root
}

pub fn scratch_is_empty(root: &Path) -> bool {
    std::fs::read_dir(root).unwrap().next().is_none()
}

/// A well-formed finalize event with no custom metadata
pub fn finalize_event(bucket: &str, name: &str, content_type: &str) -> StorageObjectEvent {
    StorageObjectEvent {
        bucket: bucket.to_string(),
        name: name.to_string(),
        content_type: content_type.to_string(),
        resource_state: ResourceState::Exists,
        metageneration: Some("1".to_string()),
        metadata: HashMap::new(),
    }
}
