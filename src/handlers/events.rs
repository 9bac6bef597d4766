/// Finalize-event push endpoint
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::Result;
use crate::models::StorageObjectEvent;
use crate::services::thumbnail::ThumbnailOutcome;
use crate::state::AppState;

#[derive(Serialize)]
struct FinalizeResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
}

/// Handle one pushed object-finalize notification.
///
/// Accepts the bare notification JSON or a Pub/Sub push envelope. Gate skips
/// answer 200 so the platform acks the delivery; a generated thumbnail
/// answers 201; pipeline failures surface as 500 through `AppError`.
pub async fn handle_finalize(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let event = StorageObjectEvent::from_push_body(&body)?;

    match state.generator.handle(&event).await? {
        ThumbnailOutcome::Skipped(reason) => Ok(HttpResponse::Ok().json(FinalizeResponse {
            status: "skipped",
            reason: Some(reason.as_str()),
            thumbnail: None,
        })),
        ThumbnailOutcome::Generated { thumbnail } => {
            Ok(HttpResponse::Created().json(FinalizeResponse {
                status: "generated",
                reason: None,
                thumbnail: Some(thumbnail),
            }))
        }
    }
}
