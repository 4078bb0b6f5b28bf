use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{require_enrollment, CurrentViewer};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::course::ResourceResponse;
use crate::schemas::module::ModuleContentResponse;
use crate::services::completion;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:module_id", get(module_detail))
}

/// Module content for an enrolled student. Opening the module records a view
/// receipt; staff reads leave no receipt.
async fn module_detail(
    Path(module_id): Path<String>,
    viewer: CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<ModuleContentResponse>, ApiError> {
    let module = repositories::modules::find_published_by_id(state.db(), &module_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load module"))?
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    require_enrollment(&state, &viewer.user, viewer.profile.as_ref(), &module.course_id).await?;

    let view = match &viewer.profile {
        Some(profile) if !viewer.user.is_staff => Some(
            completion::record_module_view(state.db(), &profile.id, &module.id, primitive_now_utc())
                .await
                .map_err(|e| ApiError::internal(e, "Failed to record module view"))?,
        ),
        _ => None,
    };

    let resources = repositories::resources::list_active_for_module(state.db(), &module.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list module resources"))?
        .into_iter()
        .map(ResourceResponse::from_db)
        .collect();

    Ok(Json(ModuleContentResponse::from_db(module, resources, view)))
}

#[cfg(test)]
mod tests;
