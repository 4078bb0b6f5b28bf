use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStaff;
use crate::api::pagination::{default_limit, PaginatedResponse};
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::certificate::CertificateResponse;
use crate::services::certificate::{self, CertificateError};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/certificates", get(list_certificates))
        .route("/certificates/:certificate_id/regenerate", post(regenerate_certificate))
}

#[derive(Debug, Deserialize)]
struct CertificateListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

async fn list_certificates(
    Query(params): Query<CertificateListQuery>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<PaginatedResponse<CertificateResponse>>, ApiError> {
    let certificates =
        repositories::certificates::list_all(state.db(), params.skip, params.limit)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to list certificates"))?;

    let total_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM certificates")
            .fetch_one(state.db())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count certificates"))?;

    Ok(Json(PaginatedResponse {
        items: certificates.into_iter().map(CertificateResponse::from_db).collect(),
        total_count,
        skip: params.skip,
        limit: params.limit,
    }))
}

/// Re-render an issued certificate through the same renderer the student
/// endpoint uses. Number and issue date are untouched; only the stored file
/// is replaced.
async fn regenerate_certificate(
    Path(certificate_id): Path<String>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let certificate = repositories::certificates::find_by_id(state.db(), &certificate_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load certificate"))?
        .ok_or_else(|| ApiError::NotFound("Certificate not found".to_string()))?;

    let profile = repositories::student_profiles::find_by_id(state.db(), &certificate.student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?
        .ok_or_else(|| ApiError::NotFound("Student profile not found".to_string()))?;

    let owner = repositories::users::find_by_id(state.db(), &profile.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load profile owner"))?
        .ok_or_else(|| ApiError::NotFound("Account for certificate not found".to_string()))?;

    let course = repositories::courses::find_by_id(state.db(), &certificate.course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    certificate::render_and_store(
        state.db(),
        state.settings(),
        state.storage(),
        &certificate,
        &owner.full_name,
        &profile.student_id,
        &course.title,
    )
    .await
    .map_err(|err| match err {
        CertificateError::Render(e) => ApiError::internal(e, "Certificate rendering failed"),
        CertificateError::Upload(e) => ApiError::internal(e, "Certificate upload failed"),
        CertificateError::Db(e) => ApiError::internal(e, "Certificate persistence failed"),
        CertificateError::NotEligible { .. } => {
            ApiError::Internal("Unexpected eligibility failure".to_string())
        }
    })?;

    tracing::info!(
        staff_id = %staff.id,
        certificate_id = %certificate.id,
        action = "certificate_regenerate",
        "Staff regenerated certificate"
    );

    let refreshed = repositories::certificates::find_by_id(state.db(), &certificate.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch regenerated certificate"))?
        .ok_or_else(|| ApiError::NotFound("Certificate not found".to_string()))?;

    Ok(Json(CertificateResponse::from_db(refreshed)))
}
