use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::OptionalUser;
use crate::core::state::AppState;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::certificate::CertificateResponse;
use crate::schemas::course::{
    CourseDetailResponse, CourseResponse, ModuleOverview, ResourceResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_courses)).route("/:course_id", get(course_detail))
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list_active(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    let mut response = Vec::with_capacity(courses.len());
    for course in courses {
        let modules_count = repositories::modules::count_published(state.db(), &course.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count modules"))?;
        response.push(CourseResponse::from_db(course, modules_count));
    }

    Ok(Json(response))
}

/// Public overview; completion status and the certificate link are only
/// present for an authenticated, enrolled student.
async fn course_detail(
    Path(course_id): Path<String>,
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let course = repositories::courses::find_active_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let modules = repositories::modules::list_published_for_course(state.db(), &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list modules"))?;
    let resources = repositories::resources::list_active_for_course(state.db(), &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list resources"))?;

    let modules_count = modules.len() as i64;
    let mut is_enrolled = false;
    let mut completed_module_ids = Vec::new();
    let mut certificate = None;

    if let Some(profile) = student_profile_for(&state, user.as_ref()).await? {
        is_enrolled = repositories::enrollments::is_enrolled(state.db(), &profile.id, &course.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?;

        if is_enrolled {
            completed_module_ids = modules
                .iter()
                .filter(|module| module.admin_completed)
                .map(|module| module.id.clone())
                .collect();

            certificate = repositories::certificates::find_for_student_course(
                state.db(),
                &profile.id,
                &course.id,
            )
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load certificate"))?
            .map(CertificateResponse::from_db);
        }
    }

    Ok(Json(CourseDetailResponse {
        course: CourseResponse::from_db(course, modules_count),
        modules: modules.into_iter().map(ModuleOverview::from_db).collect(),
        resources: resources.into_iter().map(ResourceResponse::from_db).collect(),
        is_enrolled,
        completed_module_ids,
        certificate,
    }))
}

async fn student_profile_for(
    state: &AppState,
    user: Option<&User>,
) -> Result<Option<crate::db::models::StudentProfile>, ApiError> {
    let Some(user) = user else {
        return Ok(None);
    };

    repositories::student_profiles::find_by_user_id(state.db(), &user.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student profile"))
}

#[cfg(test)]
mod tests;
