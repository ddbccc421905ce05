use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::health::probe::DatabaseProbe;

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Database round-trip response
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseCheckResponse {
    pub status: String,
    pub message: String,
    pub result: i64,
}

/// GET /health - Liveness probe.
/// Does not touch the database.
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /test-db - Runs `SELECT 1` against the configured store.
/// Failures come back as a `DATABASE_CONNECTION_FAILED` envelope.
pub async fn test_database(
    probe: web::Data<Arc<dyn DatabaseProbe>>,
) -> Result<HttpResponse, AppError> {
    let result = probe.ping().await.map_err(|e| match e {
        AppError::DatabaseUnavailable(_) => e,
        other => AppError::DatabaseUnavailable(other.to_string()),
    })?;

    Ok(HttpResponse::Ok().json(DatabaseCheckResponse {
        status: "success".to_string(),
        message: "Database connection successful".to_string(),
        result,
    }))
}

/// Configure operational routes at the root
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/test-db", web::get().to(test_database));
}
