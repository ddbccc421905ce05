use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageParams;
use crate::core::response::{ApiResponse, MessageResponse};
use crate::core::traits::EntityId;
use crate::modules::items::models::ItemResponse;
use crate::modules::users::models::{UserRequest, UserResponse};
use crate::modules::users::services::UserService;

/// List users
/// GET /api/v1/users?page_index&page_size
pub async fn list_users(
    service: web::Data<Arc<UserService>>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Users retrieved successfully",
        page.map(UserResponse::from),
    )))
}

/// Create a user
/// POST /api/v1/users
pub async fn create_user(
    service: web::Data<Arc<UserService>>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service.create(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User created successfully",
        UserResponse::from(user),
    )))
}

/// GET /api/v1/users/active
pub async fn get_active_users(
    service: web::Data<Arc<UserService>>,
) -> Result<HttpResponse, AppError> {
    let users = service.get_active_users().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Active users retrieved successfully",
        users,
    )))
}

/// Sum and average of a bare JSON array of numbers
/// POST /api/v1/users/metrics
pub async fn calculate_metrics(
    service: web::Data<Arc<UserService>>,
    values: web::Json<Vec<f64>>,
) -> Result<HttpResponse, AppError> {
    let metrics = service.calculate_user_metrics(&values)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User metrics calculated successfully",
        metrics,
    )))
}

/// GET /api/v1/users/email/{email}
pub async fn get_user_by_email(
    service: web::Data<Arc<UserService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.get_by_email(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User retrieved successfully",
        UserResponse::from(user),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, AppError> {
    let user = service.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User retrieved successfully",
        UserResponse::from(user),
    )))
}

/// GET /api/v1/users/{id}/items
pub async fn get_user_items(
    service: web::Data<Arc<UserService>>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, AppError> {
    let items = service.get_user_items(path.into_inner()).await?;
    let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User items retrieved successfully",
        items,
    )))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<EntityId>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// Soft delete
/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    service.delete(user_id).await?;

    let message = format!("User with id {} has been deleted", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        message.clone(),
        MessageResponse { message },
    )))
}

/// Configure v1 user routes.
/// Fixed segments are registered before `/{id}` so they are never parsed as IDs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/active", web::get().to(get_active_users))
            .route("/metrics", web::post().to(calculate_metrics))
            .route("/email/{email}", web::get().to(get_user_by_email))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user))
            .route("/{id}/items", web::get().to(get_user_items)),
    );
}
