// Item lifecycle and owner bookkeeping, in-process over the memory store

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use serde_json::json;
use stockroom::unit_of_work::MemoryStore;

use helpers::*;

/// POST a user and evaluate to its id
macro_rules! create_user {
    ($app:expr, $email:expr) => {{
        let (status, body) = send(
            $app,
            post_json("/api/v1/users", &user_payload($email, "Owner")).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }};
}

/// POST an item and evaluate to its id
macro_rules! create_item {
    ($app:expr, $title:expr, $price:expr, $owner:expr) => {{
        let (status, body) = send(
            $app,
            post_json("/api/v1/items", &item_payload($title, $price, $owner)).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }};
}

/// GET a user and evaluate to its items_count
macro_rules! items_count {
    ($app:expr, $user_id:expr) => {{
        let (status, body) = send(
            $app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}", $user_id))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["data"]["items_count"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_item_crud_flow() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let (status, body) = send(
        &app,
        post_json("/api/v1/items", &item_payload("  Laptop ", "999.999", None)).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item created successfully");
    let item = assert_success(&body);
    assert_eq!(item["title"], "Laptop");
    assert_eq!(item["price"], "1000.00");
    assert!(item["owner_id"].is_null());
    let id = item["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        put_json(
            &format!("/api/v1/items/{}", id),
            &json!({"title": "Laptop Pro", "price": "1299.00", "stock": 4}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = assert_success(&body);
    assert_eq!(updated["title"], "Laptop Pro");
    assert_eq!(updated["stock"], 4);
    assert!(updated["category"].is_null());

    let (status, body) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/items/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["message"],
        format!("Item with id {} has been deleted", id).as_str()
    );

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/items/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");

    // Deleting twice is a 404 too
    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/items/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_owner_items_count_follows_items() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let alice = create_user!(&app, "alice@example.com");
    let bob = create_user!(&app, "bob@example.com");

    let first = create_item!(&app, "Mouse", "19.99", Some(alice));
    create_item!(&app, "Keyboard", "49.99", Some(alice));
    assert_eq!(items_count!(&app, alice), 2);

    // Move one item to bob
    let (status, _) = send(
        &app,
        put_json(
            &format!("/api/v1/items/{}", first),
            &item_payload("Mouse", "19.99", Some(bob)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items_count!(&app, alice), 1);
    assert_eq!(items_count!(&app, bob), 1);

    // Owner listing
    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}/items", bob))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = assert_success(&body).as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Mouse");

    // Deleting the item releases the owner's count
    send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/items/{}", first))
            .to_request(),
    )
    .await;
    assert_eq!(items_count!(&app, bob), 0);
}

#[actix_web::test]
async fn test_unknown_owner_is_rejected_without_side_effects() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let (status, body) = send(
        &app,
        post_json("/api/v1/items", &item_payload("Orphan", "1.00", Some(42))).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");
    assert_eq!(body["message"], "Owner with id 42 not found");

    assert_eq!(store.snapshot().await.items.all_rows().count(), 0);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/users/42/items").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_item_payloads() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let (status, body) = send(
        &app,
        post_json("/api/v1/items", &item_payload("Broken", "-1", None)).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");

    let (status, body) = send(
        &app,
        post_json("/api/v1/items", &item_payload(&"x".repeat(101), "1", None)).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");

    let (status, body) = send(
        &app,
        post_json("/api/v1/items", &json!({"title": "No price"})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "REQUEST_VALIDATION_ERROR");

    // larger than DECIMAL(12, 2) can store
    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/items",
            &item_payload("Yacht", "123456789012345.67", None),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");
    assert_eq!(body["message"], "Price must be at most 9999999999.99");

    assert_eq!(store.snapshot().await.items.all_rows().count(), 0);
}

#[actix_web::test]
async fn test_category_listing() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    create_item!(&app, "Phone", "299.00", None);
    send(
        &app,
        post_json(
            "/api/v1/items",
            &json!({"title": "Novel", "price": "12.50", "category": " Books "}),
        )
        .to_request(),
    )
    .await;

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/items/category/books")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Items in category 'books' retrieved successfully");
    let items = assert_success(&body).as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Novel");
    assert_eq!(items[0]["category"], "books");

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/items/category/BOOKS")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = assert_success(&body).as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Novel");

    let (_, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/items/category/garden")
            .to_request(),
    )
    .await;
    assert!(assert_success(&body).as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_stock_updates() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let id = create_item!(&app, "Cable", "5.00", None);

    let (status, body) = send(
        &app,
        put_json(&format!("/api/v1/items/{}/stock", id), &json!({"quantity": 25})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body)["stock"], 25);

    let (status, body) = send(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v2/items/{}/stock", id))
            .set_json(json!({"quantity": 7}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body)["stock"], 7);
    assert_eq!(body["metadata"]["previous_stock"], 25);

    let (status, body) = send(
        &app,
        put_json(&format!("/api/v1/items/{}/stock", id), &json!({"quantity": 0})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Quantity must be greater than 0");

    let (status, _) = send(
        &app,
        put_json("/api/v1/items/999/stock", &json!({"quantity": 3})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_price_calculations() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/items/calculate-value?price=29.99&quantity=3")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body), "89.97");

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/items/calculate-discount?price=29.99&discount_percentage=15")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body), "25.49");

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/items/calculate-discount?price=10&discount_percentage=150")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");

    let id = create_item!(&app, "Headphones", "29.99", None);

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v2/items/{}/value?quantity=3", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let value = assert_success(&body);
    assert_eq!(value["item_id"], id);
    assert_eq!(value["quantity"], 3);
    assert_eq!(value["total_value"], "89.97");
    assert_eq!(body["metadata"]["item_name"], "Headphones");
    assert_eq!(body["metadata"]["unit_price"], "29.99");

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v2/items/{}/discount?discount_percentage=15", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let discount = assert_success(&body);
    assert_eq!(discount["original_price"], "29.99");
    assert_eq!(discount["final_price"], "25.49");
    assert_eq!(body["metadata"]["savings"], "4.50");

    // v2 only accepts proper discounts
    for pct in ["0", "100"] {
        let (status, body) = send(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v2/items/{}/discount?discount_percentage={}", id, pct))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[actix_web::test]
async fn test_unavailable_store_surfaces_as_500() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    store.set_available(false);
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/items").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&body, "DATABASE_CONNECTION_FAILED");
}
