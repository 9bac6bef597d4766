//! Object-finalize notification model
//!
//! The storage platform pushes one notification per finalized object, either
//! as the bare notification JSON or wrapped in a Pub/Sub push envelope with
//! the payload base64-encoded in `message.data`. Both shapes decode to the
//! same event.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Whether the object still exists at notification time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    #[default]
    Exists,
    NotExists,
}

/// One object-finalize notification, consumed once and discarded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectEvent {
    pub bucket: String,
    /// Full object path within the bucket
    pub name: String,
    /// MIME type; absent on the wire means not an image
    #[serde(default)]
    pub content_type: String,
    /// Informational only
    #[serde(default)]
    pub resource_state: ResourceState,
    /// Informational only; the platform sends it as a string or an integer
    #[serde(default, deserialize_with = "metageneration_from_wire")]
    pub metageneration: Option<String>,
    /// Custom object metadata set at upload time
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Pub/Sub push delivery wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    pub message: PushMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Base64-encoded notification JSON
    pub data: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl StorageObjectEvent {
    /// Decode a finalize notification from a raw push body, accepting both
    /// the bare notification JSON and a Pub/Sub push envelope.
    pub fn from_push_body(body: &[u8]) -> Result<Self, AppError> {
        if let Ok(event) = serde_json::from_slice::<StorageObjectEvent>(body) {
            return Ok(event);
        }

        let envelope: PushEnvelope = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("undecodable finalize event: {e}")))?;
        let payload = STANDARD
            .decode(envelope.message.data.as_bytes())
            .map_err(|e| AppError::BadRequest(format!("invalid base64 in push message: {e}")))?;
        serde_json::from_slice(&payload)
            .map_err(|e| AppError::BadRequest(format!("undecodable enveloped event: {e}")))
    }
}

fn metageneration_from_wire<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Wire>::deserialize(deserializer)?.map(|v| match v {
        Wire::Text(s) => s,
        Wire::Number(n) => n.to_string(),
    }))
}
