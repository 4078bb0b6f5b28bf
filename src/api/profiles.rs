use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentStudent, CurrentUser};
use crate::api::validation::{sanitized_filename, validate_image_upload};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::StudentProfile;
use crate::repositories;
use crate::schemas::auth::MessageResponse;
use crate::schemas::certificate::CertificateResponse;
use crate::schemas::user::{ProfileDetailResponse, ProfileResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(my_profile))
        .route("/me/picture", post(upload_profile_picture))
        .route("/:profile_id", get(profile_by_id))
}

async fn my_profile(
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<ProfileDetailResponse>, ApiError> {
    let full_name = student.user.full_name.clone();
    build_profile_detail(&state, student.profile, full_name).await.map(Json)
}

/// Staff-only view of another student's profile; self-lookups by id are
/// allowed too.
async fn profile_by_id(
    Path(profile_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileDetailResponse>, ApiError> {
    let profile = repositories::student_profiles::find_by_id(state.db(), &profile_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?
        .ok_or_else(|| ApiError::NotFound("Student profile not found".to_string()))?;

    if !user.is_staff && profile.user_id != user.id {
        return Err(ApiError::Forbidden("Permission denied"));
    }

    let owner = repositories::users::find_by_id(state.db(), &profile.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load profile owner"))?
        .ok_or_else(|| ApiError::NotFound("Student profile not found".to_string()))?;

    build_profile_detail(&state, profile, owner.full_name).await.map(Json)
}

async fn upload_profile_picture(
    student: CurrentStudent,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let storage = state.storage().ok_or_else(|| {
        ApiError::ServiceUnavailable("Object storage is not configured".to_string())
    })?;

    let mut uploaded = None;
    let max_bytes = state.settings().storage().max_upload_size_mb * 1024 * 1024;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Invalid multipart data".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadRequest("File part needs a filename".to_string()))?;
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|_| ApiError::BadRequest("Failed to read file".to_string()))?
        {
            let next_size = bytes.len() as u64 + chunk.len() as u64;
            if next_size > max_bytes {
                return Err(ApiError::BadRequest(format!(
                    "File size exceeds {}MB limit",
                    state.settings().storage().max_upload_size_mb
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        uploaded = Some((filename, content_type, bytes));
    }

    let Some((filename, content_type, bytes)) = uploaded else {
        return Err(ApiError::BadRequest("File part is required".to_string()));
    };

    validate_image_upload(
        &filename,
        &content_type,
        &state.settings().storage().allowed_image_extensions,
    )?;

    let filename = sanitized_filename(&filename);
    let object_id = Uuid::new_v4().to_string();
    let key = format!("profiles/{}/{object_id}_{filename}", student.profile.id);

    storage
        .upload_bytes(&key, &content_type, bytes)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to upload profile picture"))?;

    repositories::student_profiles::set_profile_picture(
        state.db(),
        &student.profile.id,
        &key,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store profile picture key"))?;

    Ok(Json(MessageResponse { detail: "Profile picture updated".to_string() }))
}

async fn build_profile_detail(
    state: &AppState,
    profile: StudentProfile,
    full_name: String,
) -> Result<ProfileDetailResponse, ApiError> {
    let total_modules =
        repositories::modules::count_published_for_student(state.db(), &profile.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count modules"))?;

    let completed_modules =
        repositories::modules::count_completed_for_student(state.db(), &profile.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count completed modules"))?;

    let certificates = repositories::certificates::list_for_student(state.db(), &profile.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list certificates"))?
        .into_iter()
        .map(CertificateResponse::from_db)
        .collect();

    Ok(ProfileDetailResponse {
        profile: ProfileResponse::from_db(profile, full_name),
        total_modules,
        completed_modules,
        certificates,
    })
}
