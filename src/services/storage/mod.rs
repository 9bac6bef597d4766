/// Object store access for the thumbnail pipeline
///
/// The generator reaches storage only through the `ObjectStore` trait so
/// tests can substitute an in-memory fake; `GcsClient` is the production
/// implementation.
pub mod gcs;

pub use gcs::GcsClient;

use bytes::Bytes;

use crate::error::Result;

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object's bytes
    async fn download(&self, bucket: &str, object: &str) -> Result<Bytes>;

    /// Upload bytes to an object path with a content type and custom metadata
    async fn upload(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        content_type: &str,
        metadata: &[(String, String)],
    ) -> Result<()>;
}
