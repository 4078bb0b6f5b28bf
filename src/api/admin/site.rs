use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStaff;
use crate::api::validation::validate_payload;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::admin::{
    AnnouncementCreate, AnnouncementUpdate, BranchCreate, BranchPhoneCreate, BranchUpdate,
    BulletinCreate, BulletinUpdate,
};
use crate::schemas::announcement::AnnouncementResponse;
use crate::schemas::auth::MessageResponse;
use crate::schemas::site::{BranchPhoneResponse, BranchResponse, BulletinResponse};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(list_announcements).post(create_announcement))
        .route("/announcements/:id", patch(update_announcement).delete(delete_announcement))
        .route("/bulletins", get(list_bulletins).post(create_bulletin))
        .route("/bulletins/:id", patch(update_bulletin).delete(delete_bulletin))
        .route("/branches", post(create_branch))
        .route("/branches/:branch_id", patch(update_branch).delete(delete_branch))
        .route("/branch-phones", post(create_branch_phone))
        .route("/branch-phones/:id", axum::routing::delete(delete_branch_phone))
        .route("/site/reload", post(reload_site_config))
}

async fn list_announcements(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = repositories::announcements::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list announcements"))?;

    Ok(Json(announcements.into_iter().map(AnnouncementResponse::from_db).collect()))
}

async fn create_announcement(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementCreate>,
) -> Result<(StatusCode, Json<AnnouncementResponse>), ApiError> {
    validate_payload(&payload)?;

    if let Some(batch_id) = payload.batch_id.as_deref() {
        let batch = repositories::batches::find_by_id(state.db(), batch_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load batch"))?;
        if batch.is_none() {
            return Err(ApiError::NotFound("Batch not found".to_string()));
        }
    } else if !payload.is_global {
        return Err(ApiError::BadRequest(
            "An announcement needs a batch or the global flag".to_string(),
        ));
    }

    let announcement = repositories::announcements::create(
        state.db(),
        repositories::announcements::CreateAnnouncement {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.trim(),
            content: &payload.content,
            batch_id: payload.batch_id.as_deref(),
            is_global: payload.is_global,
            is_active: payload.is_active,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create announcement"))?;

    Ok((StatusCode::CREATED, Json(AnnouncementResponse::from_db(announcement))))
}

async fn update_announcement(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementUpdate>,
) -> Result<Json<AnnouncementResponse>, ApiError> {
    repositories::announcements::update(
        state.db(),
        &id,
        repositories::announcements::UpdateAnnouncement {
            title: payload.title,
            content: payload.content,
            is_global: payload.is_global,
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update announcement"))?;

    let announcement = repositories::announcements::find_by_id(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated announcement"))?
        .ok_or_else(|| ApiError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(AnnouncementResponse::from_db(announcement)))
}

async fn delete_announcement(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::announcements::delete(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete announcement"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Announcement not found".to_string()))
    }
}

async fn list_bulletins(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<BulletinResponse>>, ApiError> {
    let bulletins = repositories::bulletins::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list bulletins"))?;

    Ok(Json(bulletins.into_iter().map(BulletinResponse::from_db).collect()))
}

async fn create_bulletin(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BulletinCreate>,
) -> Result<(StatusCode, Json<BulletinResponse>), ApiError> {
    validate_payload(&payload)?;

    let bulletin = repositories::bulletins::create(
        state.db(),
        &Uuid::new_v4().to_string(),
        payload.text.trim(),
        payload.is_active,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create bulletin"))?;

    Ok((StatusCode::CREATED, Json(BulletinResponse::from_db(bulletin))))
}

async fn update_bulletin(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BulletinUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = repositories::bulletins::update(
        state.db(),
        &id,
        payload.text,
        payload.is_active,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update bulletin"))?;

    if updated {
        Ok(Json(MessageResponse { detail: "Bulletin updated".to_string() }))
    } else {
        Err(ApiError::NotFound("Bulletin not found".to_string()))
    }
}

async fn delete_bulletin(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::bulletins::delete(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete bulletin"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Bulletin not found".to_string()))
    }
}

async fn create_branch(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BranchCreate>,
) -> Result<(StatusCode, Json<BranchResponse>), ApiError> {
    validate_payload(&payload)?;

    let branch = repositories::branches::create(
        state.db(),
        repositories::branches::CreateBranch {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            image_key: None,
            phone_number: payload.phone_number.trim(),
            address: &payload.address,
            google_map_link: &payload.google_map_link,
            is_active: payload.is_active,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create branch"))?;

    Ok((StatusCode::CREATED, Json(BranchResponse::from_db(branch))))
}

async fn update_branch(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BranchUpdate>,
) -> Result<Json<BranchResponse>, ApiError> {
    repositories::branches::update(
        state.db(),
        &id,
        repositories::branches::UpdateBranch {
            name: payload.name,
            image_key: None,
            phone_number: payload.phone_number,
            address: payload.address,
            google_map_link: payload.google_map_link,
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update branch"))?;

    let branch = repositories::branches::find_by_id(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated branch"))?
        .ok_or_else(|| ApiError::NotFound("Branch not found".to_string()))?;

    Ok(Json(BranchResponse::from_db(branch)))
}

async fn delete_branch(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::branches::delete(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete branch"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Branch not found".to_string()))
    }
}

async fn create_branch_phone(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BranchPhoneCreate>,
) -> Result<(StatusCode, Json<BranchPhoneResponse>), ApiError> {
    validate_payload(&payload)?;

    let phone = repositories::branches::create_phone(
        state.db(),
        &Uuid::new_v4().to_string(),
        payload.label.trim(),
        payload.phone_number.trim(),
        payload.order_index,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create branch phone"))?;

    Ok((StatusCode::CREATED, Json(BranchPhoneResponse::from_db(phone))))
}

async fn delete_branch_phone(
    Path(id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::branches::delete_phone(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete branch phone"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Branch phone not found".to_string()))
    }
}

/// Re-read SITE_* from the environment and swap the process-wide snapshot.
async fn reload_site_config(
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Json<MessageResponse> {
    let config = state.site().reload();

    tracing::info!(
        staff_id = %staff.id,
        site_name = %config.site_name,
        action = "site_reload",
        "Staff reloaded site configuration"
    );

    Json(MessageResponse { detail: "Site configuration reloaded".to_string() })
}
