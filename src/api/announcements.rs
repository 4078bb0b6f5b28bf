use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::announcement::AnnouncementResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_announcements))
}

/// Every active announcement the student should see: global ones plus those
/// targeted at the student's batch, newest first.
async fn list_announcements(
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = repositories::announcements::list_visible(
        state.db(),
        student.profile.batch_id.as_deref(),
        0,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list announcements"))?;

    Ok(Json(announcements.into_iter().map(AnnouncementResponse::from_db).collect()))
}
