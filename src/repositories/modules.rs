use sqlx::PgPool;

use crate::db::models::Module;

const COLUMNS: &str = "\
    id, course_id, title, description, order_index, content, video_url, \
    is_published, admin_completed, created_at, updated_at";

pub(crate) struct CreateModule<'a> {
    pub(crate) id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) order_index: i32,
    pub(crate) content: &'a str,
    pub(crate) video_url: &'a str,
    pub(crate) is_published: bool,
    pub(crate) admin_completed: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) struct UpdateModule {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) order_index: Option<i32>,
    pub(crate) content: Option<String>,
    pub(crate) video_url: Option<String>,
    pub(crate) is_published: Option<bool>,
    pub(crate) admin_completed: Option<bool>,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateModule<'_>) -> Result<Module, sqlx::Error> {
    sqlx::query_as::<_, Module>(&format!(
        "INSERT INTO modules (
            id, course_id, title, description, order_index, content, video_url,
            is_published, admin_completed, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.order_index)
    .bind(params.content)
    .bind(params.video_url)
    .bind(params.is_published)
    .bind(params.admin_completed)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    module_id: &str,
) -> Result<Option<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(&format!("SELECT {COLUMNS} FROM modules WHERE id = $1"))
        .bind(module_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_published_by_id(
    pool: &PgPool,
    module_id: &str,
) -> Result<Option<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(&format!(
        "SELECT {COLUMNS} FROM modules WHERE id = $1 AND is_published = TRUE"
    ))
    .bind(module_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_published_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(&format!(
        "SELECT {COLUMNS} FROM modules
         WHERE course_id = $1 AND is_published = TRUE
         ORDER BY order_index",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(&format!(
        "SELECT {COLUMNS} FROM modules WHERE course_id = $1 ORDER BY order_index",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn update(
    pool: &PgPool,
    module_id: &str,
    params: UpdateModule,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE modules SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            order_index = COALESCE($3, order_index),
            content = COALESCE($4, content),
            video_url = COALESCE($5, video_url),
            is_published = COALESCE($6, is_published),
            admin_completed = COALESCE($7, admin_completed),
            updated_at = $8
         WHERE id = $9",
    )
    .bind(params.title)
    .bind(params.description)
    .bind(params.order_index)
    .bind(params.content)
    .bind(params.video_url)
    .bind(params.is_published)
    .bind(params.admin_completed)
    .bind(params.updated_at)
    .bind(module_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, module_id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM modules WHERE id = $1").bind(module_id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn count_published(pool: &PgPool, course_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM modules WHERE course_id = $1 AND is_published = TRUE",
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
}

pub(crate) async fn count_published_completed(
    pool: &PgPool,
    course_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM modules
         WHERE course_id = $1 AND is_published = TRUE AND admin_completed = TRUE",
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
}

/// Completed-module total across every course the student is enrolled in.
pub(crate) async fn count_completed_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*)
         FROM modules m
         JOIN enrollments e ON e.course_id = m.course_id
         JOIN courses c ON c.id = m.course_id
         WHERE e.student_id = $1
           AND c.is_active = TRUE
           AND m.is_published = TRUE
           AND m.admin_completed = TRUE",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await
}

pub(crate) async fn count_published_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*)
         FROM modules m
         JOIN enrollments e ON e.course_id = m.course_id
         JOIN courses c ON c.id = m.course_id
         WHERE e.student_id = $1
           AND c.is_active = TRUE
           AND m.is_published = TRUE",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await
}
