use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn non_enrolled_student_gets_not_found() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch RES-1").await;
    let course = test_support::insert_course(ctx.state.db(), "Radiology Basics").await;
    let resource =
        test_support::insert_resource(ctx.state.db(), &course.id, "Syllabus", true).await;

    let (user, _profile) = test_support::insert_student(
        ctx.state.db(),
        "resstudent01",
        "Res Student",
        "password-123",
        "STU200",
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
            &format!("/api/v1/resources/{}/download", resource.id),
            Some(&token),
            None,
        ))
        .await
        .expect("download");

    // 404, never 403: the response must not confirm the resource exists.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inactive_resource_is_not_found_even_for_enrolled_student() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch RES-2").await;
    let course = test_support::insert_course(ctx.state.db(), "Pathology Basics").await;
    let resource =
        test_support::insert_resource(ctx.state.db(), &course.id, "Old Notes", false).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "resstudent02",
        "Res Student",
        "password-123",
        "STU201",
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
            &format!("/api/v1/resources/{}/download", resource.id),
            Some(&token),
            None,
        ))
        .await
        .expect("download");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_download_is_unauthorized() {
    let ctx = test_support::setup_test_context().await;
    let course = test_support::insert_course(ctx.state.db(), "Anatomy Basics").await;
    let resource =
        test_support::insert_resource(ctx.state.db(), &course.id, "Handout", true).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/resources/{}/download", resource.id),
            None,
            None,
        ))
        .await
        .expect("download");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
