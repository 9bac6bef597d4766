use actix_web::HttpResponse;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "thumbnail-service"
    }))
}

pub async fn health_ready() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ready": true }))
}
