// SPDX-License-Identifier: MIT

//! User CRUD integration tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_user_valid_request_body() {
    let (app, _state) = common::create_test_app().await;

    let response =
        common::send_json(&app, "POST", "/users", &json!({"name": "Test", "email": "test@email"}))
            .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let data = common::body_json(response).await;
    assert_eq!(data["name"], "Test");
    assert_eq!(data["email"], "test@email");
    assert_eq!(data["user_id"], 1);
}

#[tokio::test]
async fn test_create_user_incomplete_request_body() {
    let (app, _state) = common::create_test_app().await;

    let response = common::send_json(&app, "POST", "/users", &json!({"name": "Test"})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_user_invalid_email_address() {
    let (app, _state) = common::create_test_app().await;

    // invalid email (should contain @)
    let response =
        common::send_json(&app, "POST", "/users", &json!({"name": "Test", "email": "testemail"}))
            .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let data = common::body_json(response).await;
    assert_eq!(data["error"], "validation_failed");
    assert!(data["details"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_get_users_hides_email() {
    let (app, _state) = common::create_test_app().await;

    for (name, email) in [("test_1", "one@email"), ("test_2", "two@email")] {
        let response =
            common::send_json(&app, "POST", "/users", &json!({"name": name, "email": email}))
                .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = common::get(&app, "/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = common::body_json(response).await;
    let users = data.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "test_1");
    assert_eq!(users[1]["name"], "test_2");
    for user in users {
        assert!(user.get("email").is_none());
        assert!(user["user_id"].is_i64());
    }
}

#[tokio::test]
async fn test_get_user_by_user_id() {
    let (app, _state) = common::create_test_app().await;

    common::send_json(&app, "POST", "/users", &json!({"name": "test_1", "email": "a@b"})).await;

    let response = common::get(&app, "/users/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = common::body_json(response).await;
    assert_eq!(data["name"], "test_1");
    assert_eq!(data["user_id"], 1);
    assert!(data.get("email").is_none());
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let (app, _state) = common::create_test_app().await;

    let response = common::get(&app, "/users/3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let data = common::body_json(response).await;
    assert_eq!(data["error"], "not_found");
    assert_eq!(data["details"], "User not found");
}

#[tokio::test]
async fn test_update_user_updates_name() {
    let (app, _state) = common::create_test_app().await;

    common::send_json(&app, "POST", "/users", &json!({"name": "test_1", "email": "test@email"}))
        .await;

    let response = common::send_json(&app, "PATCH", "/users/1", &json!({"name": "updated"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = common::body_json(response).await;
    assert_eq!(data["name"], "updated");
    assert_eq!(data["user_id"], 1);
    assert!(data.get("email").is_none());
}

#[tokio::test]
async fn test_update_user_rejects_bad_email() {
    let (app, _state) = common::create_test_app().await;

    common::send_json(&app, "POST", "/users", &json!({"name": "test_1", "email": "test@email"}))
        .await;

    let response = common::send_json(
        &app,
        "PATCH",
        "/users/1",
        &json!({"name": "updated", "email": "updated_email"}), // missing @
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_user() {
    let (app, _state) = common::create_test_app().await;

    common::send_json(&app, "POST", "/users", &json!({"name": "test_1", "email": "a@b"})).await;

    let response = common::delete(&app, "/users/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = common::body_json(response).await;
    assert_eq!(data["message"], "User_id 1 deleted");

    let response = common::get(&app, "/users/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
