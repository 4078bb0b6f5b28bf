use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStaff;
use crate::api::pagination::{default_limit, PaginatedResponse};
use crate::core::state::AppState;
use crate::core::time::{format_offset, primitive_now_utc};
use crate::repositories;
use crate::schemas::auth::MessageResponse;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/:profile_id/verify", post(verify_student))
        .route("/students/:profile_id/unverify", post(unverify_student))
        .route("/enrollments/:student_id/:course_id", put(assign_enrollment))
        .route("/enrollments/:student_id/:course_id", delete(remove_enrollment))
}

#[derive(Debug, Deserialize)]
struct StudentListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    #[serde(alias = "isVerified")]
    is_verified: Option<bool>,
    #[serde(default)]
    #[serde(alias = "batchId")]
    batch_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct StudentOverviewResponse {
    id: String,
    user_id: String,
    student_id: String,
    username: String,
    full_name: String,
    phone: String,
    batch_id: Option<String>,
    is_active: bool,
    is_verified: bool,
    verified_at: Option<String>,
    enrollment_date: String,
}

async fn list_students(
    Query(params): Query<StudentListQuery>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<PaginatedResponse<StudentOverviewResponse>>, ApiError> {
    let rows = repositories::student_profiles::list_overview(
        state.db(),
        params.is_verified,
        params.batch_id.as_deref(),
        params.skip,
        params.limit,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list students"))?;

    let total_count = repositories::student_profiles::count_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count students"))?;

    let items = rows
        .into_iter()
        .map(|row| StudentOverviewResponse {
            id: row.id,
            user_id: row.user_id,
            student_id: row.student_id,
            username: row.username,
            full_name: row.full_name,
            phone: row.phone,
            batch_id: row.batch_id,
            is_active: row.is_active,
            is_verified: row.is_verified,
            verified_at: row.verified_at.map(format_offset),
            enrollment_date: row.enrollment_date.to_string(),
        })
        .collect();

    Ok(Json(PaginatedResponse { items, total_count, skip: params.skip, limit: params.limit }))
}

/// The admin approval that unlocks login for a registered student.
async fn verify_student(
    Path(profile_id): Path<String>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = repositories::student_profiles::set_verification(
        state.db(),
        &profile_id,
        true,
        Some(OffsetDateTime::now_utc()),
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to verify student"))?;

    if !updated {
        return Err(ApiError::NotFound("Student profile not found".to_string()));
    }

    tracing::info!(
        staff_id = %staff.id,
        profile_id = %profile_id,
        action = "student_verify",
        "Staff verified student"
    );

    Ok(Json(MessageResponse { detail: "Student verified".to_string() }))
}

async fn unverify_student(
    Path(profile_id): Path<String>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = repositories::student_profiles::set_verification(
        state.db(),
        &profile_id,
        false,
        None,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to unverify student"))?;

    if !updated {
        return Err(ApiError::NotFound("Student profile not found".to_string()));
    }

    tracing::info!(
        staff_id = %staff.id,
        profile_id = %profile_id,
        action = "student_unverify",
        "Staff revoked student verification"
    );

    Ok(Json(MessageResponse { detail: "Student verification revoked".to_string() }))
}

async fn assign_enrollment(
    Path((student_id, course_id)): Path<(String, String)>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let profile = repositories::student_profiles::find_by_id(state.db(), &student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?;
    if profile.is_none() {
        return Err(ApiError::NotFound("Student profile not found".to_string()));
    }

    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;
    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    repositories::enrollments::ensure(
        state.db(),
        &student_id,
        &course_id,
        Some(&staff.id),
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to assign enrollment"))?;

    Ok(StatusCode::NO_CONTENT)
}

async fn remove_enrollment(
    Path((student_id, course_id)): Path<(String, String)>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let removed = repositories::enrollments::remove(state.db(), &student_id, &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to remove enrollment"))?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Enrollment not found".to_string()))
    }
}
