use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::announcement::AnnouncementResponse;
use crate::schemas::course::CourseResponse;
use crate::schemas::dashboard::DashboardResponse;
use crate::schemas::site::{BranchResponse, GalleryImageResponse};
use crate::schemas::user::ProfileResponse;

const RECENT_ANNOUNCEMENTS: i64 = 5;
const RECENT_GALLERY_IMAGES: i64 = 4;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

async fn dashboard(
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let courses =
        repositories::courses::list_enrolled_for_student(state.db(), &student.profile.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to list enrolled courses"))?;

    let mut course_responses = Vec::with_capacity(courses.len());
    for course in courses {
        let modules_count = repositories::modules::count_published(state.db(), &course.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count modules"))?;
        course_responses.push(CourseResponse::from_db(course, modules_count));
    }

    let announcements = repositories::announcements::list_visible(
        state.db(),
        student.profile.batch_id.as_deref(),
        RECENT_ANNOUNCEMENTS,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list announcements"))?
    .into_iter()
    .map(AnnouncementResponse::from_db)
    .collect();

    let completed_modules =
        repositories::modules::count_completed_for_student(state.db(), &student.profile.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count completed modules"))?;

    let branches = repositories::branches::list_active(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list branches"))?
        .into_iter()
        .map(BranchResponse::from_db)
        .collect();

    let gallery_images = repositories::gallery::list(state.db(), RECENT_GALLERY_IMAGES)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list gallery images"))?
        .into_iter()
        .map(GalleryImageResponse::from_db)
        .collect();

    let full_name = student.user.full_name.clone();
    Ok(Json(DashboardResponse {
        student: ProfileResponse::from_db(student.profile, full_name),
        courses: course_responses,
        announcements,
        completed_modules,
        branches,
        gallery_images,
    }))
}
