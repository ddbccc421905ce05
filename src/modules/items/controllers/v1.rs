use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::pagination::PageParams;
use crate::core::response::{ApiResponse, MessageResponse};
use crate::core::traits::EntityId;
use crate::modules::items::models::{ItemRequest, ItemResponse, StockUpdateRequest};
use crate::modules::items::services::ItemService;

/// Query for `POST /calculate-value`
#[derive(Debug, Deserialize)]
pub struct TotalValueQuery {
    pub price: Decimal,
    pub quantity: i64,
}

/// Query for `POST /calculate-discount`
#[derive(Debug, Deserialize)]
pub struct DiscountQuery {
    pub price: Decimal,
    pub discount_percentage: Decimal,
}

/// GET /api/v1/items?page_index&page_size
pub async fn list_items(
    service: web::Data<Arc<ItemService>>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Items retrieved successfully",
        page.map(ItemResponse::from),
    )))
}

/// POST /api/v1/items
pub async fn create_item(
    service: web::Data<Arc<ItemService>>,
    request: web::Json<ItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service.create(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Item created successfully",
        ItemResponse::from(item),
    )))
}

/// GET /api/v1/items/category/{category}
pub async fn get_items_by_category(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = path.into_inner();
    let items: Vec<ItemResponse> = service
        .get_by_category(&category)
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Items in category '{}' retrieved successfully", category),
        items,
    )))
}

/// POST /api/v1/items/calculate-value?price&quantity
pub async fn calculate_total_value(
    service: web::Data<Arc<ItemService>>,
    query: web::Query<TotalValueQuery>,
) -> Result<HttpResponse, AppError> {
    let total = service.calculate_total_value(query.price, query.quantity)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Total value calculated successfully",
        total,
    )))
}

/// POST /api/v1/items/calculate-discount?price&discount_percentage
pub async fn calculate_discount(
    service: web::Data<Arc<ItemService>>,
    query: web::Query<DiscountQuery>,
) -> Result<HttpResponse, AppError> {
    let final_price = service.calculate_discount(query.price, query.discount_percentage)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Discount calculated successfully",
        final_price,
    )))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, AppError> {
    let item = service.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Item retrieved successfully",
        ItemResponse::from(item),
    )))
}

/// PUT /api/v1/items/{id}
pub async fn update_item(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
    request: web::Json<ItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Item updated successfully",
        ItemResponse::from(item),
    )))
}

/// PUT /api/v1/items/{id}/stock
pub async fn update_stock(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
    request: web::Json<StockUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let (_, item) = service
        .update_stock(path.into_inner(), request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Item stock updated successfully",
        ItemResponse::from(item),
    )))
}

/// Soft delete
/// DELETE /api/v1/items/{id}
pub async fn delete_item(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    service.delete(item_id).await?;

    let message = format!("Item with id {} has been deleted", item_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        message.clone(),
        MessageResponse { message },
    )))
}

/// Configure v1 item routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            .route("/category/{category}", web::get().to(get_items_by_category))
            .route("/calculate-value", web::post().to(calculate_total_value))
            .route("/calculate-discount", web::post().to(calculate_discount))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item))
            .route("/{id}/stock", web::put().to(update_stock)),
    );
}
