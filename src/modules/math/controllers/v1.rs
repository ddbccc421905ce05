use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::response::ApiResponse;
use crate::modules::math::models::{BatchOperationRequest, OperandsRequest, OperationResult};
use crate::modules::math::services::MathService;

/// GET /api/v1/math/operations
pub async fn get_available_operations(
    service: web::Data<Arc<MathService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Available operations retrieved successfully",
        service.available_operations(),
    )))
}

/// POST /api/v1/math/batch
pub async fn calculate_batch(
    service: web::Data<Arc<MathService>>,
    request: web::Json<Vec<BatchOperationRequest>>,
) -> Result<HttpResponse, AppError> {
    let operations = request.into_inner();
    let results = service.calculate_batch(&operations)?;

    let data: Vec<OperationResult> = operations
        .into_iter()
        .zip(results)
        .map(|(op, result)| OperationResult {
            operation: op.operation,
            x: op.x,
            y: op.y,
            result,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Successfully calculated {} operations", data.len()),
        data,
    )))
}

/// Operands in the query string
/// POST /api/v1/math/calculate/{operation}?x&y
pub async fn calculate_with_query(
    service: web::Data<Arc<MathService>>,
    path: web::Path<String>,
    query: web::Query<OperandsRequest>,
) -> Result<HttpResponse, AppError> {
    let operation = path.into_inner();
    let result = service.calculate(&operation, query.x, query.y)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Operation '{}' calculated successfully", operation),
        result,
    )))
}

/// Operands in the JSON body
/// POST /api/v1/math/{operation}
pub async fn calculate_with_body(
    service: web::Data<Arc<MathService>>,
    path: web::Path<String>,
    request: web::Json<OperandsRequest>,
) -> Result<HttpResponse, AppError> {
    let operation = path.into_inner();
    let result = service.calculate(&operation, request.x, request.y)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Operation '{}' calculated successfully", operation),
        result,
    )))
}

/// Configure v1 math routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/math")
            .route("/operations", web::get().to(get_available_operations))
            .route("/batch", web::post().to(calculate_batch))
            .route("/calculate/{operation}", web::post().to(calculate_with_query))
            .route("/{operation}", web::post().to(calculate_with_body)),
    );
}
