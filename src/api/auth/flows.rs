use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn signup_signin_and_me() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "Grace@Example.com",
                "password": "cobol-rules",
                "role": "educator"
            })),
        ))
        .await
        .expect("signup");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["email"], "grace@example.com");
    assert_eq!(body["user"]["role"], "educator");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/signin",
            None,
            Some(json!({ "email": "grace@example.com", "password": "cobol-rules" })),
        ))
        .await
        .expect("signin");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let token = body["access_token"].as_str().expect("token").to_string();

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/v1/auth/me", Some(&token), None))
        .await
        .expect("me");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["first_name"], "Grace");
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    test_support::insert_user(ctx.state.db(), "taken@example.com", UserRole::Student).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "first_name": "Other",
                "last_name": "Person",
                "email": "TAKEN@example.com",
                "password": "long-enough",
                "role": "student"
            })),
        ))
        .await
        .expect("signup");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert_eq!(body["detail"], "User with email 'taken@example.com' already exists");
}

#[tokio::test]
async fn signup_validates_payload() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "first_name": "Short",
                "last_name": "Password",
                "email": "short@example.com",
                "password": "1234",
                "role": "student"
            })),
        ))
        .await
        .expect("signup");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    test_support::insert_user(ctx.state.db(), "student@example.com", UserRole::Student).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/signin",
            None,
            Some(json!({ "email": "student@example.com", "password": "not-the-password" })),
        ))
        .await
        .expect("signin");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Invalid username or password");
}
