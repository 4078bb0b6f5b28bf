use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{require_enrollment, CurrentViewer};
use crate::core::state::AppState;
use crate::repositories;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:resource_id/download", get(download_resource))
}

/// Stream a course resource as an attachment. Inactive, unknown and
/// not-enrolled all answer 404 so existence leaks nothing.
async fn download_resource(
    Path(resource_id): Path<String>,
    viewer: CurrentViewer,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let resource = repositories::resources::find_active_by_id(state.db(), &resource_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load resource"))?
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    require_enrollment(&state, &viewer.user, viewer.profile.as_ref(), &resource.course_id).await?;

    let storage = state.storage().ok_or_else(|| {
        ApiError::ServiceUnavailable("Object storage is not configured".to_string())
    })?;

    let bytes = storage
        .download_bytes(&resource.file_key)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to read resource file"))?;

    let disposition = format!("attachment; filename=\"{}\"", resource.file_name);

    let mut response = (StatusCode::OK, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    metrics::counter!("resource_downloads_total").increment(1);

    Ok(response)
}

#[cfg(test)]
mod tests;
