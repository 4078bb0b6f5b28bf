use axum::body::to_bytes;
use axum::http::{header, Method, StatusCode};
use tower::ServiceExt;

use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn generate_rejects_incomplete_course_without_creating_a_row() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch CERT-1").await;
    let course = test_support::insert_course(ctx.state.db(), "Nursing Assistant").await;
    test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;
    test_support::insert_module(ctx.state.db(), &course.id, 2, true, false).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "certstudent01",
        "Cert Student",
        "password-123",
        "S1",
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
            &format!("/api/v1/certificates/{}/generate", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("generate");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
    assert!(body["detail"].as_str().unwrap().contains("complete all modules"));

    let certificate =
        repositories::certificates::find_for_student_course(ctx.state.db(), &profile.id, &course.id)
            .await
            .expect("lookup certificate");
    assert!(certificate.is_none(), "no row may exist after a rejected generation");
}

#[tokio::test]
async fn generate_returns_pdf_with_deterministic_number() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "B1").await;
    let course = test_support::insert_course(ctx.state.db(), "C1").await;
    test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;
    test_support::insert_module(ctx.state.db(), &course.id, 2, true, true).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "certstudent02",
        "Cert Student",
        "password-123",
        "S1",
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
            &format!("/api/v1/certificates/{}/generate", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("generate");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap(),
        "application/pdf"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("pdf body");
    assert!(bytes.starts_with(b"%PDF"));

    let year = time::OffsetDateTime::now_utc().date().year();
    let certificate =
        repositories::certificates::find_for_student_course(ctx.state.db(), &profile.id, &course.id)
            .await
            .expect("lookup certificate")
            .expect("certificate row exists");
    assert_eq!(certificate.certificate_number, format!("TTI-{year}-S1"));
}

#[tokio::test]
async fn regenerate_preserves_number_and_issue_date() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch CERT-3").await;
    let course = test_support::insert_course(ctx.state.db(), "Lab Technician").await;
    test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;

    let (user, profile) = test_support::insert_student(
        ctx.state.db(),
        "certstudent03",
        "Cert Student",
        "password-123",
        "S3",
        Some(&batch.id),
        true,
    )
    .await;
    test_support::enroll(ctx.state.db(), &profile, &course).await;

    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let request = |app: axum::Router| {
        app.oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/certificates/{}/generate", course.id),
            Some(&token),
            None,
        ))
    };

    let first = request(ctx.app.clone()).await.expect("first generate");
    assert_eq!(first.status(), StatusCode::OK);
    let first_row =
        repositories::certificates::find_for_student_course(ctx.state.db(), &profile.id, &course.id)
            .await
            .expect("lookup")
            .expect("row");

    let second = request(ctx.app.clone()).await.expect("second generate");
    assert_eq!(second.status(), StatusCode::OK);
    let second_row =
        repositories::certificates::find_for_student_course(ctx.state.db(), &profile.id, &course.id)
            .await
            .expect("lookup")
            .expect("row");

    assert_eq!(first_row.id, second_row.id);
    assert_eq!(first_row.certificate_number, second_row.certificate_number);
    assert_eq!(first_row.issue_date, second_row.issue_date);
}

#[tokio::test]
async fn unenrolled_student_cannot_generate() {
    let ctx = test_support::setup_test_context().await;
    let batch = test_support::insert_batch(ctx.state.db(), "Batch CERT-4").await;
    let course = test_support::insert_course(ctx.state.db(), "Physiotherapy").await;
    test_support::insert_module(ctx.state.db(), &course.id, 1, true, true).await;

    let (user, _profile) = test_support::insert_student(
        ctx.state.db(),
        "certstudent04",
        "Cert Student",
        "password-123",
        "S4",
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
            &format!("/api/v1/certificates/{}/generate", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("generate");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
