use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{require_enrollment, CurrentStudent};
use crate::core::state::AppState;
use crate::repositories;
use crate::services::certificate::{self, CertificateError};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:course_id/generate", get(generate_certificate))
}

/// Returns the certificate PDF for a fully completed course, creating the
/// row on first request. Ineligible requests fail before any row or file
/// exists; repeat requests keep the original number and issue date.
async fn generate_certificate(
    Path(course_id): Path<String>,
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    require_enrollment(&state, &student.user, Some(&student.profile), &course.id).await?;

    let issued = certificate::issue_or_regenerate(
        state.db(),
        state.settings(),
        state.storage(),
        &student.profile,
        &student.user.full_name,
        &course,
    )
    .await
    .map_err(|err| match err {
        CertificateError::NotEligible { .. } => ApiError::BadRequest(
            "You must complete all modules before getting a certificate".to_string(),
        ),
        CertificateError::Db(e) => ApiError::internal(e, "Certificate persistence failed"),
        CertificateError::Render(e) => ApiError::internal(e, "Certificate rendering failed"),
        CertificateError::Upload(e) => ApiError::internal(e, "Certificate upload failed"),
    })?;

    let disposition = format!("attachment; filename=\"{}\"", issued.file_name);

    let mut response = (StatusCode::OK, issued.pdf_bytes).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok(response)
}

#[cfg(test)]
mod tests;
