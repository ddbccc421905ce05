//! Routes extractor failures through `AppError` so malformed JSON, bad path
//! segments and bad query strings get the same envelope as service errors.

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, Error, HttpRequest, HttpResponse,
};

use crate::core::error::AppError;
use crate::core::response::ApiResponse;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    log_rejection(req, &err);
    AppError::RequestValidation(format!("Invalid request body: {}", err)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    log_rejection(req, &err);
    AppError::RequestValidation(format!("Invalid path parameter: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    log_rejection(req, &err);
    AppError::RequestValidation(format!("Invalid query parameter: {}", err)).into()
}

fn log_rejection(req: &HttpRequest, err: &dyn std::fmt::Display) {
    tracing::debug!(path = %req.path(), "Rejected request: {}", err);
}

/// Register the extractor configs on an app or scope
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        "NOT_FOUND",
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
