/// Thumbnail Service - HTTP push endpoint
///
/// Receives object-finalize notifications from cloud storage and generates
/// 200x200 shrink-to-fit thumbnails for image objects next to their source.
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use thumbnail_service::config::Config;
use thumbnail_service::error::AppError;
use thumbnail_service::services::storage::GcsClient;
use thumbnail_service::services::thumbnail::{MagickConverter, ThumbnailGenerator};
use thumbnail_service::{handlers, logging, AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logging::init_tracing();
    let cfg = Config::from_env()?;
    cfg.ensure_scratch_root()?;

    let store = Arc::new(GcsClient::from_config(&cfg.gcs)?);
    let converter = Arc::new(MagickConverter::new(cfg.convert_bin.clone()));
    let generator = Arc::new(ThumbnailGenerator::new(
        store,
        converter,
        cfg.scratch_root.clone(),
    ));

    let state = AppState { generator };

    let bind_addr = format!("{}:{}", cfg.host, cfg.port);
    tracing::info!(
        %bind_addr,
        scratch_root = %cfg.scratch_root.display(),
        convert_bin = %cfg.convert_bin,
        "starting thumbnail-service"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(handlers::health))
            .route("/health/ready", web::get().to(handlers::health_ready))
            .route(
                "/events/finalize",
                web::post().to(handlers::handle_finalize),
            )
    })
    .bind(&bind_addr)
    .map_err(|e| AppError::StartServer(format!("bind {bind_addr}: {e}")))?
    .run()
    .await
    .map_err(|e| AppError::StartServer(format!("server: {e}")))
}
