use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::response::ApiResponse;
use crate::modules::math::models::{BatchOperationRequest, BatchResult};
use crate::modules::math::services::MathService;

/// POST /api/v2/math/batch
pub async fn batch_calculate(
    service: web::Data<Arc<MathService>>,
    request: web::Json<Vec<BatchOperationRequest>>,
) -> Result<HttpResponse, AppError> {
    let operations = request.into_inner();
    let results = service.calculate_batch(&operations)?;
    let operations_count = operations.len();

    let data: Vec<BatchResult> = operations
        .into_iter()
        .zip(results)
        .map(|(op, result)| BatchResult {
            operation: op.operation,
            result,
        })
        .collect();

    Ok(HttpResponse::Ok().json(
        ApiResponse::success("Batch operations calculated successfully", data)
            .with_metadata("operations_count", operations_count),
    ))
}

/// Configure v2 math routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/math").route("/batch", web::post().to(batch_calculate)));
}
