use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStaff;
use crate::api::validation::{sanitized_filename, validate_document_upload, validate_image_upload};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::ResourceType;
use crate::repositories;
use crate::schemas::auth::MessageResponse;
use crate::schemas::course::ResourceResponse;
use crate::schemas::site::GalleryImageResponse;
use crate::services::storage::StorageService;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/courses/:course_id/resources", post(upload_resource))
        .route("/courses/:course_id/thumbnail", post(upload_course_thumbnail))
        .route("/resources/:resource_id", delete(delete_resource))
        .route("/branches/:branch_id/image", post(upload_branch_image))
        .route("/gallery", post(upload_gallery_image))
        .route("/gallery/:image_id", delete(delete_gallery_image))
}

struct UploadedFile {
    bytes: Vec<u8>,
    filename: String,
    content_type: String,
}

struct MultipartFields {
    file: Option<UploadedFile>,
    text: std::collections::HashMap<String, String>,
}

async fn upload_resource(
    Path(course_id): Path<String>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;
    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let storage = require_storage(&state)?;
    let fields = read_multipart(&state, multipart).await?;
    let file =
        fields.file.ok_or_else(|| ApiError::BadRequest("File part is required".to_string()))?;

    let extension = validate_document_upload(
        &file.filename,
        &state.settings().storage().allowed_document_extensions,
    )?;

    let module_id = match fields.text.get("module_id").map(String::as_str) {
        Some(module_id) if !module_id.is_empty() => {
            let module = repositories::modules::find_by_id(state.db(), module_id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to load module"))?;
            match module {
                Some(module) if module.course_id == course_id => Some(module.id),
                _ => return Err(ApiError::BadRequest("Module does not belong to course".to_string())),
            }
        }
        _ => None,
    };

    let filename = sanitized_filename(&file.filename);
    let object_id = Uuid::new_v4().to_string();
    let key = format!("resources/{course_id}/{object_id}_{filename}");

    let (size, _hash) = storage
        .upload_bytes(&key, &file.content_type, file.bytes)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to upload resource file"))?;

    let title = fields.text.get("title").cloned().unwrap_or_else(|| filename.clone());
    let description = fields.text.get("description").cloned().unwrap_or_default();

    let resource = repositories::resources::create(
        state.db(),
        repositories::resources::CreateResource {
            id: &Uuid::new_v4().to_string(),
            course_id: &course_id,
            module_id: module_id.as_deref(),
            title: title.trim(),
            description: &description,
            file_key: &key,
            file_name: &filename,
            file_size: size,
            resource_type: ResourceType::from_extension(&extension),
            is_active: true,
            uploaded_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create resource"))?;

    tracing::info!(
        staff_id = %staff.id,
        resource_id = %resource.id,
        course_id = %course_id,
        action = "resource_upload",
        "Staff uploaded resource"
    );

    Ok((StatusCode::CREATED, Json(ResourceResponse::from_db(resource))))
}

async fn delete_resource(
    Path(resource_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let resource = repositories::resources::find_by_id(state.db(), &resource_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load resource"))?
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    repositories::resources::delete(state.db(), &resource.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete resource"))?;

    if let Some(storage) = state.storage() {
        if let Err(err) = storage.delete_object(&resource.file_key).await {
            tracing::warn!(error = %err, key = %resource.file_key, "Failed to delete stored object");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn upload_course_thumbnail(
    Path(course_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;
    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let (key, _text) =
        upload_image_part(&state, multipart, &format!("course_thumbnails/{course_id}")).await?;

    repositories::courses::update(
        state.db(),
        &course_id,
        repositories::courses::UpdateCourse {
            title: None,
            description: None,
            thumbnail_key: Some(key),
            duration: None,
            is_active: None,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store thumbnail key"))?;

    Ok(Json(MessageResponse { detail: "Thumbnail updated".to_string() }))
}

async fn upload_branch_image(
    Path(branch_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let branch = repositories::branches::find_by_id(state.db(), &branch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load branch"))?;
    if branch.is_none() {
        return Err(ApiError::NotFound("Branch not found".to_string()));
    }

    let (key, _text) =
        upload_image_part(&state, multipart, &format!("branches/{branch_id}")).await?;

    repositories::branches::update(
        state.db(),
        &branch_id,
        repositories::branches::UpdateBranch {
            name: None,
            image_key: Some(key),
            phone_number: None,
            address: None,
            google_map_link: None,
            is_active: None,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store branch image key"))?;

    Ok(Json(MessageResponse { detail: "Branch image updated".to_string() }))
}

/// Validate and upload one image part; returns the stored object key plus
/// any accompanying text fields.
async fn upload_image_part(
    state: &AppState,
    multipart: Multipart,
    key_prefix: &str,
) -> Result<(String, std::collections::HashMap<String, String>), ApiError> {
    let storage = require_storage(state)?;
    let fields = read_multipart(state, multipart).await?;
    let file =
        fields.file.ok_or_else(|| ApiError::BadRequest("File part is required".to_string()))?;

    validate_image_upload(
        &file.filename,
        &file.content_type,
        &state.settings().storage().allowed_image_extensions,
    )?;

    let filename = sanitized_filename(&file.filename);
    let object_id = Uuid::new_v4().to_string();
    let key = format!("{key_prefix}/{object_id}_{filename}");

    storage
        .upload_bytes(&key, &file.content_type, file.bytes)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to upload image"))?;

    Ok((key, fields.text))
}

async fn upload_gallery_image(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryImageResponse>), ApiError> {
    let (key, text) = upload_image_part(&state, multipart, "gallery").await?;

    let caption = text.get("caption").cloned().unwrap_or_default();
    let image = repositories::gallery::create(
        state.db(),
        &Uuid::new_v4().to_string(),
        &key,
        caption.trim(),
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create gallery image"))?;

    Ok((StatusCode::CREATED, Json(GalleryImageResponse::from_db(image))))
}

async fn delete_gallery_image(
    Path(image_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::gallery::delete(state.db(), &image_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete gallery image"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Gallery image not found".to_string()))
    }
}

fn require_storage(state: &AppState) -> Result<&StorageService, ApiError> {
    state.storage().ok_or_else(|| {
        ApiError::ServiceUnavailable("Object storage is not configured".to_string())
    })
}

/// Collect one file part plus any text parts, enforcing the upload cap while
/// streaming chunks.
async fn read_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<MultipartFields, ApiError> {
    let max_bytes = state.settings().storage().max_upload_size_mb * 1024 * 1024;
    let mut file = None;
    let mut text = std::collections::HashMap::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Invalid multipart data".to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
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

            file = Some(UploadedFile { bytes, filename, content_type });
        } else if !name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::BadRequest("Invalid multipart data".to_string()))?;
            text.insert(name, value);
        }
    }

    Ok(MultipartFields { file, text })
}
