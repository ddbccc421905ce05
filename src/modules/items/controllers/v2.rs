use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::response::ApiResponse;
use crate::core::traits::EntityId;
use crate::modules::items::models::{
    ItemDiscountResponse, ItemResponse, ItemValueResponse, StockUpdateRequest,
};
use crate::modules::items::services::ItemService;

#[derive(Debug, Deserialize)]
pub struct ValueQuery {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct DiscountQuery {
    pub discount_percentage: Decimal,
}

/// Stock update reporting the level it replaced
/// PATCH /api/v2/items/{id}/stock
pub async fn update_stock(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
    request: web::Json<StockUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let (previous_stock, item) = service
        .update_stock(path.into_inner(), request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success("Item stock updated successfully", ItemResponse::from(item))
            .with_metadata("previous_stock", previous_stock),
    ))
}

/// GET /api/v2/items/{id}/value?quantity
pub async fn get_item_value(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
    query: web::Query<ValueQuery>,
) -> Result<HttpResponse, AppError> {
    let (item, total_value) = service.item_value(path.into_inner(), query.quantity).await?;

    let body = ItemValueResponse {
        item_id: item.id,
        quantity: query.quantity,
        total_value,
    };
    Ok(HttpResponse::Ok().json(
        ApiResponse::success("Item value calculated successfully", body)
            .with_metadata("item_name", item.title)
            .with_metadata("unit_price", item.price.to_string()),
    ))
}

/// GET /api/v2/items/{id}/discount?discount_percentage
pub async fn get_item_discount(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<EntityId>,
    query: web::Query<DiscountQuery>,
) -> Result<HttpResponse, AppError> {
    let (item, final_price) = service
        .item_discount(path.into_inner(), query.discount_percentage)
        .await?;

    let savings = item.price - final_price;
    let body = ItemDiscountResponse {
        item_id: item.id,
        original_price: item.price,
        discount_percentage: query.discount_percentage,
        final_price,
    };
    Ok(HttpResponse::Ok().json(
        ApiResponse::success("Item discount calculated successfully", body)
            .with_metadata("item_name", item.title)
            .with_metadata("savings", savings.to_string()),
    ))
}

/// Configure v2 item routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/items")
            .route("/{id}/stock", web::patch().to(update_stock))
            .route("/{id}/value", web::get().to(get_item_value))
            .route("/{id}/discount", web::get().to(get_item_discount)),
    );
}
