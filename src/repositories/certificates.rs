use sqlx::PgPool;

use crate::db::models::Certificate;

const COLUMNS: &str = "\
    id, student_id, course_id, certificate_number, issue_date, pdf_key, created_at, updated_at";

pub(crate) struct CreateCertificate<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) certificate_number: &'a str,
    pub(crate) issue_date: time::Date,
    pub(crate) created_at: time::PrimitiveDateTime,
}

/// Get-or-create keyed on (student, course). Concurrent duplicate requests
/// race on the insert; the loser reads the winner's row instead of failing.
pub(crate) async fn get_or_create(
    pool: &PgPool,
    params: CreateCertificate<'_>,
) -> Result<Certificate, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Certificate>(&format!(
        "INSERT INTO certificates (
            id, student_id, course_id, certificate_number, issue_date, pdf_key,
            created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,NULL,$6,$6)
         ON CONFLICT (student_id, course_id) DO NOTHING
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.certificate_number)
    .bind(params.issue_date)
    .bind(params.created_at)
    .fetch_optional(pool)
    .await?;

    if let Some(certificate) = inserted {
        return Ok(certificate);
    }

    sqlx::query_as::<_, Certificate>(&format!(
        "SELECT {COLUMNS} FROM certificates WHERE student_id = $1 AND course_id = $2"
    ))
    .bind(params.student_id)
    .bind(params.course_id)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>(&format!("SELECT {COLUMNS} FROM certificates WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_for_student_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<Option<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>(&format!(
        "SELECT {COLUMNS} FROM certificates WHERE student_id = $1 AND course_id = $2"
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>(&format!(
        "SELECT {COLUMNS} FROM certificates
         WHERE student_id = $1
         ORDER BY issue_date DESC",
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(
    pool: &PgPool,
    skip: i64,
    limit: i64,
) -> Result<Vec<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>(&format!(
        "SELECT {COLUMNS} FROM certificates
         ORDER BY issue_date DESC, certificate_number
         OFFSET $1 LIMIT $2",
    ))
    .bind(skip.max(0))
    .bind(limit.clamp(1, 1000))
    .fetch_all(pool)
    .await
}

pub(crate) async fn set_pdf_key(
    pool: &PgPool,
    id: &str,
    pdf_key: &str,
    updated_at: time::PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE certificates SET pdf_key = $1, updated_at = $2 WHERE id = $3")
        .bind(pdf_key)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
