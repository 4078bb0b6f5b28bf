use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn course_detail_is_public_but_hides_gated_fields() {
    let ctx = test_support::setup_test_context().await;
    let course = test_support::insert_course(ctx.state.db(), "Paramedical Nursing").await;
    test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;
    test_support::insert_module(ctx.state.db(), &course.id, 2, true, false).await;
    // Unpublished modules never reach the public listing.
    test_support::insert_module(ctx.state.db(), &course.id, 3, false, false).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}", course.id),
            None,
            None,
        ))
        .await
        .expect("course detail");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["modules"].as_array().unwrap().len(), 2);
    assert_eq!(body["is_enrolled"], false);
    assert!(body["completed_module_ids"].as_array().unwrap().is_empty());
    assert!(body["certificate"].is_null());
}

#[tokio::test]
async fn course_detail_shows_completion_for_enrolled_student() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch CD-1").await;
    let course = test_support::insert_course(ctx.state.db(), "Medical Assistant").await;
    let completed = test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;
    test_support::insert_module(ctx.state.db(), &course.id, 2, true, false).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "cdstudent01",
        "Enrolled Student",
        "password-123",
        "STU100",
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
            &format!("/api/v1/courses/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("course detail");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["is_enrolled"], true);

    let completed_ids = body["completed_module_ids"].as_array().unwrap();
    assert_eq!(completed_ids.len(), 1);
    assert_eq!(completed_ids[0], completed.id.as_str());
}

#[tokio::test]
async fn inactive_course_is_not_found() {
    let ctx = test_support::setup_test_context().await;
    let course = test_support::insert_course(ctx.state.db(), "Retired Course").await;
    crate::repositories::courses::update(
        ctx.state.db(),
        &course.id,
        crate::repositories::courses::UpdateCourse {
            title: None,
            description: None,
            thumbnail_key: None,
            duration: None,
            is_active: Some(false),
            updated_at: crate::core::time::primitive_now_utc(),
        },
    )
    .await
    .expect("deactivate course");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}", course.id),
            None,
            None,
        ))
        .await
        .expect("course detail");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
