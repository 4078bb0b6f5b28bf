use sqlx::PgPool;
use uuid::Uuid;

pub(crate) async fn is_enrolled(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, String>(
        "SELECT id FROM enrollments WHERE student_id = $1 AND course_id = $2",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Admin-assigned enrollment; repeated assignment keeps the original row.
pub(crate) async fn ensure(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
    assigned_by: Option<&str>,
    assigned_at: time::PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO enrollments (id, student_id, course_id, assigned_by, assigned_at)
         VALUES ($1,$2,$3,$4,$5)
         ON CONFLICT (student_id, course_id) DO NOTHING",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(student_id)
    .bind(course_id)
    .bind(assigned_by)
    .bind(assigned_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn remove(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM enrollments WHERE student_id = $1 AND course_id = $2")
            .bind(student_id)
            .bind(course_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
