use sqlx::PgPool;

use crate::db::models::Course;

const COLUMNS: &str =
    "id, title, description, thumbnail_key, duration, is_active, created_at, updated_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) thumbnail_key: Option<&'a str>,
    pub(crate) duration: &'a str,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) struct UpdateCourse {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) thumbnail_key: Option<String>,
    pub(crate) duration: Option<String>,
    pub(crate) is_active: Option<bool>,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            id, title, description, thumbnail_key, duration, is_active, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.thumbnail_key)
    .bind(params.duration)
    .bind(params.is_active)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    course_id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(course_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_active_by_id(
    pool: &PgPool,
    course_id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM courses WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_active(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM courses WHERE is_active = TRUE ORDER BY title"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses ORDER BY title"))
        .fetch_all(pool)
        .await
}

/// Active courses an admin has assigned the student to, dashboard order.
pub(crate) async fn list_enrolled_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT c.{}
         FROM courses c
         JOIN enrollments e ON e.course_id = c.id
         WHERE e.student_id = $1 AND c.is_active = TRUE
         ORDER BY c.title",
        COLUMNS.replace(", ", ", c."),
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn update(
    pool: &PgPool,
    course_id: &str,
    params: UpdateCourse,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE courses SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            thumbnail_key = COALESCE($3, thumbnail_key),
            duration = COALESCE($4, duration),
            is_active = COALESCE($5, is_active),
            updated_at = $6
         WHERE id = $7",
    )
    .bind(params.title)
    .bind(params.description)
    .bind(params.thumbnail_key)
    .bind(params.duration)
    .bind(params.is_active)
    .bind(params.updated_at)
    .bind(course_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, course_id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM courses WHERE id = $1").bind(course_id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn link_batch(
    pool: &PgPool,
    course_id: &str,
    batch_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO course_batches (course_id, batch_id)
         VALUES ($1, $2)
         ON CONFLICT (course_id, batch_id) DO NOTHING",
    )
    .bind(course_id)
    .bind(batch_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn unlink_batch(
    pool: &PgPool,
    course_id: &str,
    batch_id: &str,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM course_batches WHERE course_id = $1 AND batch_id = $2")
            .bind(course_id)
            .bind(batch_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
