// User lifecycle through the v1 and v2 routes, in-process over the memory store

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use serde_json::json;
use stockroom::unit_of_work::MemoryStore;

use helpers::*;

#[actix_web::test]
async fn test_user_crud_flow() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // Create
    let (status, body) = send(
        &app,
        post_json("/api/v1/users", &user_payload("Alice@Example.com", "Alice")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user = assert_success(&body);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["items_count"], 0);
    let id = user["id"].as_i64().unwrap();

    // Read by id and by email
    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body)["name"], "Alice");

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/email/ALICE@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert_success(&body)["id"], id);

    // Update
    let (status, body) = send(
        &app,
        put_json(
            &format!("/api/v1/users/{}", id),
            &json!({"email": "alice@example.com", "name": "Alice Smith", "is_active": false}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = assert_success(&body);
    assert_eq!(updated["name"], "Alice Smith");
    assert_eq!(updated["is_active"], false);

    // Delete hides the user from reads
    let (status, body) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let expected = format!("User with id {} has been deleted", id);
    assert_eq!(body["message"], expected.as_str());
    assert_eq!(body["data"]["message"], expected.as_str());

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");

    // The row is soft deleted, not removed
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.users.all_rows().count(), 1);
    assert_eq!(snapshot.users.live().count(), 0);
}

#[actix_web::test]
async fn test_duplicate_email_conflicts() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let (status, _) = send(
        &app,
        post_json("/api/v1/users", &user_payload("bob@example.com", "Bob")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        post_json("/api/v1/users", &user_payload("BOB@example.com", "Bobby")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "CONFLICT");
    assert_eq!(body["message"], "User with email 'bob@example.com' already exists");
}

#[actix_web::test]
async fn test_update_to_taken_email_conflicts() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    send(&app, post_json("/api/v1/users", &user_payload("a@example.com", "A")).to_request()).await;
    let (_, body) = send(
        &app,
        post_json("/api/v1/users", &user_payload("b@example.com", "B")).to_request(),
    )
    .await;
    let b_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        put_json(
            &format!("/api/v1/users/{}", b_id),
            &user_payload("a@example.com", "B"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "CONFLICT");
}

#[actix_web::test]
async fn test_invalid_user_payloads() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // Fails business validation
    let (status, body) = send(
        &app,
        post_json("/api/v1/users", &user_payload("not-an-email", "X")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");

    // Missing field fails extraction
    let (status, body) = send(
        &app,
        post_json("/api/v1/users", &json!({"name": "No Email"})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "REQUEST_VALIDATION_ERROR");

    // Non-numeric id fails extraction
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/users/abc").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "REQUEST_VALIDATION_ERROR");

    assert_eq!(store.snapshot().await.users.all_rows().count(), 0);
}

#[actix_web::test]
async fn test_list_users_paginates() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for n in 0..5 {
        send(
            &app,
            post_json(
                "/api/v1/users",
                &user_payload(&format!("user{}@example.com", n), &format!("User {}", n)),
            )
            .to_request(),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?page_index=2&page_size=2")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let page = assert_success(&body);
    assert_eq!(page["total_count"], 5);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["has_previous"], true);
    assert_eq!(page["has_next"], true);
    let emails: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["user2@example.com", "user3@example.com"]);

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?page_index=0")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BAD_REQUEST");
}

#[actix_web::test]
async fn test_active_users_and_metrics() {
    let store = MemoryStore::new();
    let state = app_state(&store);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    send(&app, post_json("/api/v1/users", &user_payload("on@example.com", "On")).to_request()).await;
    send(
        &app,
        post_json(
            "/api/v1/users",
            &json!({"email": "off@example.com", "name": "Off", "is_active": false}),
        )
        .to_request(),
    )
    .await;

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/users/active").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let active = assert_success(&body).as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["email"], "on@example.com");

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v2/users/active").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["total_count"], 1);

    let (status, body) = send(
        &app,
        post_json("/api/v2/users/metrics", &json!({"metric_values": [1.0, 2.0, 3.0, 4.0]}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let metrics = assert_success(&body);
    assert_f64(&metrics["total"], 10.0);
    assert_f64(&metrics["average"], 2.5);
    assert_eq!(body["metadata"]["metrics_count"], 4);

    let (status, body) = send(
        &app,
        post_json("/api/v1/users/metrics", &json!([])).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_f64(&body["data"]["average"], 0.0);
}
