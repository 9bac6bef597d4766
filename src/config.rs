/// Configuration management for thumbnail-service
///
/// Loads configuration from environment variables with sensible defaults.
/// Only hosting concerns live here; thumbnail geometry is a fixed constant.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct GcsConfig {
    /// Storage API host, overridable for emulators
    pub host: String,
    /// Inline service account JSON, raw or base64
    pub service_account_json: Option<String>,
    /// Alternative: path to a service account JSON file
    pub service_account_json_path: Option<String>,
}

impl GcsConfig {
    /// Resolve the service account JSON document from the configured source
    pub fn load_service_account_json(&self) -> Result<String, AppError> {
        if let Some(ref json) = self.service_account_json {
            // Inline value may be base64 encoded
            if !json.trim().starts_with('{') {
                let decoded = STANDARD.decode(json.trim()).map_err(|e| {
                    AppError::Config(format!("failed to decode base64 service account JSON: {e}"))
                })?;
                return String::from_utf8(decoded).map_err(|e| {
                    AppError::Config(format!("invalid UTF-8 in service account JSON: {e}"))
                });
            }
            return Ok(json.clone());
        }

        if let Some(ref path) = self.service_account_json_path {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("failed to read service account JSON at {path}: {e}"))
            });
        }

        Err(AppError::Config(
            "either GCS_SERVICE_ACCOUNT_JSON or GCS_SERVICE_ACCOUNT_JSON_PATH must be set".into(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gcs: GcsConfig,
    /// Root directory for per-invocation scratch directories
    pub scratch_root: PathBuf,
    /// ImageMagick convert binary
    pub convert_bin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let host = env::var("THUMBNAIL_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("THUMBNAIL_SERVICE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8084);

        let gcs = GcsConfig {
            host: env::var("GCS_HOST").unwrap_or_else(|_| "storage.googleapis.com".to_string()),
            service_account_json: env::var("GCS_SERVICE_ACCOUNT_JSON").ok(),
            service_account_json_path: env::var("GCS_SERVICE_ACCOUNT_JSON_PATH").ok(),
        };

        let scratch_root = env::var("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        let convert_bin = env::var("CONVERT_BIN").unwrap_or_else(|_| "convert".to_string());

        Ok(Self {
            host,
            port,
            gcs,
            scratch_root,
            convert_bin,
        })
    }

    /// Ensure the scratch root exists and is writable before serving traffic
    pub fn ensure_scratch_root(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.scratch_root).map_err(|e| {
            AppError::Config(format!(
                "failed to prepare scratch root {}: {e}",
                self.scratch_root.display()
            ))
        })
    }
}
