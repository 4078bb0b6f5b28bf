use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::site::{
    BranchPhoneResponse, BranchResponse, BulletinResponse, GalleryImageResponse, SiteInfoResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site_info))
        .route("/branches", get(branches))
        .route("/gallery", get(gallery))
        .route("/batches", get(open_batches))
}

/// Active batches offered on the registration form.
#[derive(Debug, Serialize)]
struct OpenBatchResponse {
    id: String,
    name: String,
    start_date: String,
    end_date: String,
}

/// Branding, contact details, the scrolling bulletin and extra phone
/// numbers, previously injected into every page by a template context
/// processor.
async fn site_info(State(state): State<AppState>) -> Result<Json<SiteInfoResponse>, ApiError> {
    let config = state.site().current();

    let bulletin = repositories::bulletins::find_displayed(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load bulletin"))?
        .map(BulletinResponse::from_db);

    let phones = repositories::branches::list_active_phones(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load branch phones"))?
        .into_iter()
        .map(BranchPhoneResponse::from_db)
        .collect();

    Ok(Json(SiteInfoResponse::new(config, bulletin, phones)))
}

async fn branches(State(state): State<AppState>) -> Result<Json<Vec<BranchResponse>>, ApiError> {
    let branches = repositories::branches::list_active(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list branches"))?;

    Ok(Json(branches.into_iter().map(BranchResponse::from_db).collect()))
}

async fn gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryImageResponse>>, ApiError> {
    let images = repositories::gallery::list(state.db(), 0)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list gallery images"))?;

    Ok(Json(images.into_iter().map(GalleryImageResponse::from_db).collect()))
}

async fn open_batches(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpenBatchResponse>>, ApiError> {
    let batches = repositories::batches::list(state.db(), true)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list batches"))?;

    Ok(Json(
        batches
            .into_iter()
            .map(|batch| OpenBatchResponse {
                id: batch.id,
                name: batch.name,
                start_date: batch.start_date.to_string(),
                end_date: batch.end_date.to_string(),
            })
            .collect(),
    ))
}
