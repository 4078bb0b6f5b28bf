use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn opening_a_module_records_a_view_receipt() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch MOD-1").await;
    let course = test_support::insert_course(ctx.state.db(), "First Aid").await;
    let module = test_support::insert_module(ctx.state.db(), &course.id, 1, true, false).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "modstudent01",
        "Module Student",
        "password-123",
        "STU300",
        Some(&batch.id),
        true,
    )
    .await;
    test_support::enroll(ctx.state.db(), &profile, &course).await;

    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let request = |app: axum::Router| {
        app.oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/modules/{}", module.id),
            Some(&token),
            None,
        ))
    };

    let response = request(ctx.app.clone()).await.expect("module detail");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["content"], "Module content");

    let view =
        repositories::module_views::find_for_student_module(ctx.state.db(), &profile.id, &module.id)
            .await
            .expect("lookup view")
            .expect("view recorded");

    // A second visit keeps the original receipt.
    let response = request(ctx.app.clone()).await.expect("module detail again");
    assert_eq!(response.status(), StatusCode::OK);

    let second =
        repositories::module_views::find_for_student_module(ctx.state.db(), &profile.id, &module.id)
            .await
            .expect("lookup view")
            .expect("view still recorded");
    assert_eq!(view.id, second.id);
    assert_eq!(view.first_viewed_at, second.first_viewed_at);
}

#[tokio::test]
async fn non_enrolled_student_cannot_open_module() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch MOD-2").await;
    let course = test_support::insert_course(ctx.state.db(), "Midwifery").await;
    let module = test_support::insert_module(ctx.state.db(), &course.id, 1, true, false).await;

    let (user, _profile) = test_support::insert_student(
        ctx.state.db(),
        "modstudent02",
        "Module Student",
        "password-123",
        "STU301",
        Some(&batch.id),
        true,
    )
    .await;

    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/modules/{}", module.id),
            Some(&token),
            None,
        ))
        .await
        .expect("module detail");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unpublished_module_is_not_found() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch MOD-3").await;
    let course = test_support::insert_course(ctx.state.db(), "Dental Assisting").await;
    let module = test_support::insert_module(ctx.state.db(), &course.id, 1, false, false).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "modstudent03",
        "Module Student",
        "password-123",
        "STU302",
        Some(&batch.id),
        true,
    )
    .await;
    test_support::enroll(ctx.state.db(), &profile, &course).await;

    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/modules/{}", module.id),
            Some(&token),
            None,
        ))
        .await
        .expect("module detail");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
