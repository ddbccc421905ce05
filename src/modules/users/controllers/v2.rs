use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::response::ApiResponse;
use crate::modules::users::models::{UserMetricsRequest, UserResponse};
use crate::modules::users::services::UserService;

/// Active users with their count in the metadata
/// GET /api/v2/users/active
pub async fn get_active_users(
    service: web::Data<Arc<UserService>>,
) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = service
        .get_active_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let total_count = users.len();

    Ok(HttpResponse::Ok().json(
        ApiResponse::success("Active users retrieved successfully", users)
            .with_metadata("total_count", total_count),
    ))
}

/// POST /api/v2/users/metrics
pub async fn calculate_metrics(
    service: web::Data<Arc<UserService>>,
    request: web::Json<UserMetricsRequest>,
) -> Result<HttpResponse, AppError> {
    let values = &request.metric_values;
    let metrics = service.calculate_user_metrics(values)?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success("User metrics calculated successfully", metrics)
            .with_metadata("metrics_count", values.len()),
    ))
}

/// Configure v2 user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/active", web::get().to(get_active_users))
            .route("/metrics", web::post().to(calculate_metrics)),
    );
}
