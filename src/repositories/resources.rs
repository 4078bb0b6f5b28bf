use sqlx::PgPool;

use crate::db::models::Resource;
use crate::db::types::ResourceType;

const COLUMNS: &str = "\
    id, course_id, module_id, title, description, file_key, file_name, file_size, \
    resource_type, is_active, uploaded_at";

pub(crate) struct CreateResource<'a> {
    pub(crate) id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) module_id: Option<&'a str>,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) file_key: &'a str,
    pub(crate) file_name: &'a str,
    pub(crate) file_size: i64,
    pub(crate) resource_type: ResourceType,
    pub(crate) is_active: bool,
    pub(crate) uploaded_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateResource<'_>,
) -> Result<Resource, sqlx::Error> {
    sqlx::query_as::<_, Resource>(&format!(
        "INSERT INTO resources (
            id, course_id, module_id, title, description, file_key, file_name, file_size,
            resource_type, is_active, uploaded_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.module_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.file_key)
    .bind(params.file_name)
    .bind(params.file_size)
    .bind(params.resource_type)
    .bind(params.is_active)
    .bind(params.uploaded_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_active_by_id(
    pool: &PgPool,
    resource_id: &str,
) -> Result<Option<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>(&format!(
        "SELECT {COLUMNS} FROM resources WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(resource_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    resource_id: &str,
) -> Result<Option<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>(&format!("SELECT {COLUMNS} FROM resources WHERE id = $1"))
        .bind(resource_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_active_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>(&format!(
        "SELECT {COLUMNS} FROM resources
         WHERE course_id = $1 AND is_active = TRUE
         ORDER BY uploaded_at DESC",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_active_for_module(
    pool: &PgPool,
    module_id: &str,
) -> Result<Vec<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>(&format!(
        "SELECT {COLUMNS} FROM resources
         WHERE module_id = $1 AND is_active = TRUE
         ORDER BY uploaded_at DESC",
    ))
    .bind(module_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, resource_id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM resources WHERE id = $1").bind(resource_id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
