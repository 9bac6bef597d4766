//! GCS client for thumbnail storage operations
//!
//! Provides download/upload functionality using the GCS REST API with V4
//! signed URLs generated from service account credentials. The bucket comes
//! from each finalize event, so one client serves any bucket the service
//! account can reach.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::GcsConfig;
use crate::error::{AppError, Result};

use super::ObjectStore;

/// Characters that must be percent-encoded in the path component
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Lifetime of each signed URL; requests are fired immediately after signing
const SIGNED_URL_TTL: Duration = Duration::from_secs(300);

/// GCS client for downloading and uploading objects with signed URLs
pub struct GcsClient {
    client_email: String,
    private_key: RsaPrivateKey,
    host: String,
    http_client: Client,
}

impl GcsClient {
    /// Create a new GCS client from a service account JSON document
    pub fn new(service_account_json: &str, host: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct Sa {
            client_email: String,
            private_key: String,
        }
        let sa: Sa = serde_json::from_str(service_account_json)
            .map_err(|e| AppError::Config(format!("invalid service account JSON: {e}")))?;

        let private_key = RsaPrivateKey::from_pkcs8_pem(&sa.private_key).map_err(|e| {
            AppError::Config(format!("failed to parse service account private key: {e}"))
        })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {e}")))?;

        info!(host = %host, "GCS client initialized");

        Ok(Self {
            client_email: sa.client_email,
            private_key,
            host: host.to_string(),
            http_client,
        })
    }

    /// Create a new GCS client from configuration
    pub fn from_config(cfg: &GcsConfig) -> Result<Self> {
        let sa_json = cfg.load_service_account_json()?;
        Self::new(&sa_json, &cfg.host)
    }

    /// Generate a V4 signed URL. Extra headers (content type, object
    /// metadata) are folded into the signed header set alongside host.
    fn sign_url(
        &self,
        method: &str,
        bucket: &str,
        object_path: &str,
        headers: &[(String, String)],
    ) -> Result<String> {
        let now = Utc::now();
        let datestamp = now.format("%Y%m%d").to_string();
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();

        let credential_scope = format!("{datestamp}/auto/storage/goog4_request");
        let credential = format!("{}/{}", self.client_email, credential_scope);

        let encoded_object = utf8_percent_encode(object_path, PATH_SET).to_string();
        let canonical_uri = format!(
            "/{}{}",
            bucket,
            if encoded_object.starts_with('/') {
                encoded_object
            } else {
                format!("/{}", encoded_object)
            }
        );

        let mut header_items: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        header_items.push(("host".to_string(), self.host.clone()));
        header_items.sort();

        let canonical_headers = header_items
            .iter()
            .map(|(k, v)| format!("{k}:{v}\n"))
            .collect::<String>();
        let signed_headers = header_items
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let expires = SIGNED_URL_TTL.as_secs();
        let mut query_items = vec![
            ("X-Goog-Algorithm", "GOOG4-RSA-SHA256".to_string()),
            (
                "X-Goog-Credential",
                urlencoding::encode(&credential).into_owned(),
            ),
            ("X-Goog-Date", timestamp.clone()),
            ("X-Goog-Expires", expires.to_string()),
            (
                "X-Goog-SignedHeaders",
                urlencoding::encode(&signed_headers).into_owned(),
            ),
        ];

        query_items.sort_by(|a, b| a.0.cmp(b.0));
        let canonical_query = query_items
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let canonical_request = format!(
            "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\nUNSIGNED-PAYLOAD"
        );
        let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));

        let string_to_sign =
            format!("GOOG4-RSA-SHA256\n{timestamp}\n{credential_scope}\n{canonical_hash}");

        let signing_key = SigningKey::<Sha256>::new(self.private_key.clone());
        let signature = signing_key.sign(string_to_sign.as_bytes()).to_bytes();
        let signature_hex = hex::encode(signature);

        let query_with_sig = format!("{canonical_query}&X-Goog-Signature={signature_hex}");
        let url = format!(
            "https://{host}{canonical_uri}?{query_with_sig}",
            host = self.host
        );
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ObjectStore for GcsClient {
    async fn download(&self, bucket: &str, object: &str) -> Result<Bytes> {
        let signed_url = self.sign_url("GET", bucket, object, &[])?;

        debug!(bucket = %bucket, object = %object, "Downloading from GCS");

        let response = self
            .http_client
            .get(&signed_url)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("GCS download failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "GCS download failed with status {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Storage(format!("failed to read GCS response: {e}")))?;

        debug!(bucket = %bucket, object = %object, size = bytes.len(), "Downloaded from GCS");
        Ok(bytes)
    }

    async fn upload(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        content_type: &str,
        metadata: &[(String, String)],
    ) -> Result<()> {
        let mut headers: Vec<(String, String)> =
            vec![("content-type".to_string(), content_type.to_string())];
        for (key, value) in metadata {
            headers.push((format!("x-goog-meta-{key}"), value.clone()));
        }

        let signed_url = self.sign_url("PUT", bucket, object, &headers)?;

        debug!(bucket = %bucket, object = %object, size = data.len(), "Uploading to GCS");

        let mut request = self.http_client.put(&signed_url).body(data.clone());
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("GCS upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "GCS upload failed with status {status}: {body}"
            )));
        }

        info!(bucket = %bucket, object = %object, size = data.len(), "Uploaded to GCS");
        Ok(())
    }
}
