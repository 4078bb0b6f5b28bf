use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, put},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStaff;
use crate::api::validation::validate_payload;
use crate::core::state::AppState;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::db::models::{Batch, Module};
use crate::repositories;
use crate::schemas::admin::{
    BatchCreate, BatchUpdate, CourseCreate, CourseUpdate, ModuleCreate, ModuleUpdate,
};
use crate::schemas::course::CourseResponse;
use serde::Serialize;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/batches", get(list_batches).post(create_batch))
        .route("/batches/:batch_id", patch(update_batch).delete(delete_batch))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/:course_id", patch(update_course).delete(delete_course))
        .route("/courses/:course_id/batches/:batch_id", put(link_batch))
        .route("/courses/:course_id/batches/:batch_id", delete(unlink_batch))
        .route("/courses/:course_id/modules", get(list_modules).post(create_module))
        .route("/modules/:module_id", patch(update_module).delete(delete_module))
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    id: String,
    name: String,
    start_date: String,
    end_date: String,
    is_active: bool,
    description: String,
    created_at: String,
}

impl BatchResponse {
    fn from_db(batch: Batch) -> Self {
        Self {
            id: batch.id,
            name: batch.name,
            start_date: batch.start_date.to_string(),
            end_date: batch.end_date.to_string(),
            is_active: batch.is_active,
            description: batch.description,
            created_at: format_primitive(batch.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
struct ModuleAdminResponse {
    id: String,
    course_id: String,
    title: String,
    description: String,
    order_index: i32,
    content: String,
    video_url: String,
    is_published: bool,
    admin_completed: bool,
    updated_at: String,
}

impl ModuleAdminResponse {
    fn from_db(module: Module) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title: module.title,
            description: module.description,
            order_index: module.order_index,
            content: module.content,
            video_url: module.video_url,
            is_published: module.is_published,
            admin_completed: module.admin_completed,
            updated_at: format_primitive(module.updated_at),
        }
    }
}

async fn list_batches(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<BatchResponse>>, ApiError> {
    let batches = repositories::batches::list(state.db(), false)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list batches"))?;

    Ok(Json(batches.into_iter().map(BatchResponse::from_db).collect()))
}

async fn create_batch(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BatchCreate>,
) -> Result<(StatusCode, Json<BatchResponse>), ApiError> {
    validate_payload(&payload)?;

    if payload.end_date < payload.start_date {
        return Err(ApiError::BadRequest("end_date must not precede start_date".to_string()));
    }

    let existing = repositories::batches::exists_by_name(state.db(), payload.name.trim())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check batch name"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("A batch with this name already exists".to_string()));
    }

    let now = primitive_now_utc();
    let batch = repositories::batches::create(
        state.db(),
        repositories::batches::CreateBatch {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
            description: &payload.description,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create batch"))?;

    Ok((StatusCode::CREATED, Json(BatchResponse::from_db(batch))))
}

async fn update_batch(
    Path(batch_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<BatchUpdate>,
) -> Result<Json<BatchResponse>, ApiError> {
    repositories::batches::update(
        state.db(),
        &batch_id,
        repositories::batches::UpdateBatch {
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
            description: payload.description,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update batch"))?;

    let batch = repositories::batches::find_by_id(state.db(), &batch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated batch"))?
        .ok_or_else(|| ApiError::NotFound("Batch not found".to_string()))?;

    Ok(Json(BatchResponse::from_db(batch)))
}

async fn delete_batch(
    Path(batch_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::batches::delete(state.db(), &batch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete batch"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Batch not found".to_string()))
    }
}

async fn list_courses(
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list_all(state.db())
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

async fn create_course(
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    validate_payload(&payload)?;

    let now = primitive_now_utc();
    let course = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.trim(),
            description: &payload.description,
            thumbnail_key: None,
            duration: &payload.duration,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create course"))?;

    tracing::info!(
        staff_id = %staff.id,
        course_id = %course.id,
        action = "course_create",
        "Staff created course"
    );

    Ok((StatusCode::CREATED, Json(CourseResponse::from_db(course, 0))))
}

async fn update_course(
    Path(course_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<CourseUpdate>,
) -> Result<Json<CourseResponse>, ApiError> {
    repositories::courses::update(
        state.db(),
        &course_id,
        repositories::courses::UpdateCourse {
            title: payload.title,
            description: payload.description,
            thumbnail_key: None,
            duration: payload.duration,
            is_active: payload.is_active,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update course"))?;

    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let modules_count = repositories::modules::count_published(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count modules"))?;

    Ok(Json(CourseResponse::from_db(course, modules_count)))
}

async fn delete_course(
    Path(course_id): Path<String>,
    CurrentStaff(staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::courses::delete(state.db(), &course_id).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            ApiError::Conflict("Cannot delete course due to dependent records".to_string())
        } else {
            ApiError::internal(e, "Failed to delete course")
        }
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    tracing::info!(
        staff_id = %staff.id,
        course_id = %course_id,
        action = "course_delete",
        "Staff deleted course"
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn link_batch(
    Path((course_id, batch_id)): Path<(String, String)>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;
    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let batch = repositories::batches::find_by_id(state.db(), &batch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load batch"))?;
    if batch.is_none() {
        return Err(ApiError::NotFound("Batch not found".to_string()));
    }

    repositories::courses::link_batch(state.db(), &course_id, &batch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to link batch"))?;

    Ok(StatusCode::NO_CONTENT)
}

async fn unlink_batch(
    Path((course_id, batch_id)): Path<(String, String)>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let removed = repositories::courses::unlink_batch(state.db(), &course_id, &batch_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to unlink batch"))?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Course-batch link not found".to_string()))
    }
}

async fn list_modules(
    Path(course_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<ModuleAdminResponse>>, ApiError> {
    let modules = repositories::modules::list_for_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list modules"))?;

    Ok(Json(modules.into_iter().map(ModuleAdminResponse::from_db).collect()))
}

async fn create_module(
    Path(course_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<ModuleCreate>,
) -> Result<(StatusCode, Json<ModuleAdminResponse>), ApiError> {
    validate_payload(&payload)?;

    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;
    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let now = primitive_now_utc();
    let module = repositories::modules::create(
        state.db(),
        repositories::modules::CreateModule {
            id: &Uuid::new_v4().to_string(),
            course_id: &course_id,
            title: payload.title.trim(),
            description: &payload.description,
            order_index: payload.order_index,
            content: &payload.content,
            video_url: &payload.video_url,
            is_published: payload.is_published,
            admin_completed: payload.admin_completed,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("A module with this order already exists in the course".to_string())
        } else {
            ApiError::internal(e, "Failed to create module")
        }
    })?;

    Ok((StatusCode::CREATED, Json(ModuleAdminResponse::from_db(module))))
}

async fn update_module(
    Path(module_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
    Json(payload): Json<ModuleUpdate>,
) -> Result<Json<ModuleAdminResponse>, ApiError> {
    repositories::modules::update(
        state.db(),
        &module_id,
        repositories::modules::UpdateModule {
            title: payload.title,
            description: payload.description,
            order_index: payload.order_index,
            content: payload.content,
            video_url: payload.video_url,
            is_published: payload.is_published,
            admin_completed: payload.admin_completed,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("A module with this order already exists in the course".to_string())
        } else {
            ApiError::internal(e, "Failed to update module")
        }
    })?;

    let module = repositories::modules::find_by_id(state.db(), &module_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated module"))?
        .ok_or_else(|| ApiError::NotFound("Module not found".to_string()))?;

    Ok(Json(ModuleAdminResponse::from_db(module)))
}

async fn delete_module(
    Path(module_id): Path<String>,
    CurrentStaff(_staff): CurrentStaff,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::modules::delete(state.db(), &module_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete module"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Module not found".to_string()))
    }
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23503"),
        _ => false,
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
