//! Route handlers

pub mod verification;

use actix_web::HttpResponse;
use otp_shared::types::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "otp-relay-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Default handler for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(otp_shared::types::ApiResponse::<()>::error(
        "The requested resource was not found",
    ))
}
