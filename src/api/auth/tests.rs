use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn register_creates_unverified_account() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-A").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "student01",
                "password": "student-pass",
                "first_name": "Test",
                "last_name": "Student",
                "student_id": "STU001",
                "phone": "1234567890",
                "batch_id": batch.id
            })),
        ))
        .await
        .expect("register");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert!(body["detail"].as_str().unwrap().contains("pending verification"));

    let user = repositories::users::find_by_username(ctx.state.db(), "student01")
        .await
        .expect("find user")
        .expect("user exists");
    let profile = repositories::student_profiles::find_by_user_id(ctx.state.db(), &user.id)
        .await
        .expect("find profile")
        .expect("profile exists");
    assert!(!profile.is_verified);
}

#[tokio::test]
async fn unverified_login_gets_pending_warning_and_no_token() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-B").await;
    test_support::insert_student(
        ctx.state.db(),
        "pending01",
        "Pending Student",
        "correct-password",
        "STU002",
        Some(&batch.id),
        false,
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "pending01", "password": "correct-password" })),
        ))
        .await
        .expect("login");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "response: {body}");
    assert!(body["detail"].as_str().unwrap().contains("pending verification"));
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn verified_student_can_login() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-C").await;
    test_support::insert_student(
        ctx.state.db(),
        "verified01",
        "Verified Student",
        "correct-password",
        "STU003",
        Some(&batch.id),
        true,
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "verified01", "password": "correct-password" })),
        ))
        .await
        .expect("login");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn wrong_password_is_unauthorized_not_pending() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-D").await;
    test_support::insert_student(
        ctx.state.db(),
        "verified02",
        "Verified Student",
        "correct-password",
        "STU004",
        Some(&batch.id),
        true,
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "verified02", "password": "wrong-password" })),
        ))
        .await
        .expect("login");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_student_id_registration_conflicts() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-E").await;
    test_support::insert_student(
        ctx.state.db(),
        "existing01",
        "Existing Student",
        "password-123",
        "STU005",
        Some(&batch.id),
        true,
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "different01",
                "password": "password-456",
                "first_name": "Other",
                "last_name": "Student",
                "student_id": "STU005",
                "phone": "0987654321",
                "batch_id": batch.id
            })),
        ))
        .await
        .expect("register");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert!(body["detail"].as_str().unwrap().contains("Registration No"));

    let duplicate = repositories::users::find_by_username(ctx.state.db(), "different01")
        .await
        .expect("find user");
    assert!(duplicate.is_none(), "no account row may exist after a rejected registration");
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch 2026-F").await;

    let first = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "mailuser01",
                "password": "password-123",
                "first_name": "Mail",
                "last_name": "User",
                "email": "Student@Example.COM",
                "student_id": "STU006",
                "phone": "1112223333",
                "batch_id": batch.id
            })),
        ))
        .await
        .expect("register");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "mailuser02",
                "password": "password-123",
                "first_name": "Mail",
                "last_name": "User",
                "email": "student@example.com",
                "student_id": "STU007",
                "phone": "1112224444",
                "batch_id": batch.id
            })),
        ))
        .await
        .expect("register");

    let status = second.status();
    let body = test_support::read_json(second).await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert!(body["detail"].as_str().unwrap().contains("email"));
}
