use sqlx::PgPool;
use time::OffsetDateTime;

use crate::db::models::StudentProfile;

const COLUMNS: &str = "\
    id, user_id, student_id, phone, batch_id, date_of_birth, address, \
    profile_picture_key, enrollment_date, is_active, is_verified, verified_at, \
    created_at, updated_at";

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<StudentProfile>, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(&format!(
        "SELECT {COLUMNS} FROM student_profiles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_by_user_id(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<StudentProfile>, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(&format!(
        "SELECT {COLUMNS} FROM student_profiles WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn exists_by_student_id(
    pool: &PgPool,
    student_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT id FROM student_profiles WHERE student_id = $1")
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

pub(crate) struct CreateProfile<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub student_id: &'a str,
    pub phone: &'a str,
    pub batch_id: Option<&'a str>,
    pub date_of_birth: Option<time::Date>,
    pub address: &'a str,
    pub profile_picture_key: Option<&'a str>,
    pub enrollment_date: time::Date,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateProfile<'_>,
) -> Result<StudentProfile, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(&format!(
        "INSERT INTO student_profiles (
            id, user_id, student_id, phone, batch_id, date_of_birth, address,
            profile_picture_key, enrollment_date, is_active, is_verified, verified_at,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,TRUE,FALSE,NULL,$10,$11)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.student_id)
    .bind(params.phone)
    .bind(params.batch_id)
    .bind(params.date_of_birth)
    .bind(params.address)
    .bind(params.profile_picture_key)
    .bind(params.enrollment_date)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn set_verification(
    pool: &PgPool,
    profile_id: &str,
    is_verified: bool,
    verified_at: Option<OffsetDateTime>,
    updated_at: time::PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE student_profiles
         SET is_verified = $1, verified_at = $2, updated_at = $3
         WHERE id = $4",
    )
    .bind(is_verified)
    .bind(verified_at)
    .bind(updated_at)
    .bind(profile_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn set_profile_picture(
    pool: &PgPool,
    profile_id: &str,
    picture_key: &str,
    updated_at: time::PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE student_profiles SET profile_picture_key = $1, updated_at = $2 WHERE id = $3",
    )
    .bind(picture_key)
    .bind(updated_at)
    .bind(profile_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_profiles").fetch_one(pool).await
}

/// Back-office listing row, joined with the owning account.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct StudentOverviewRow {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) student_id: String,
    pub(crate) username: String,
    pub(crate) full_name: String,
    pub(crate) phone: String,
    pub(crate) batch_id: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    pub(crate) verified_at: Option<OffsetDateTime>,
    pub(crate) enrollment_date: time::Date,
}

pub(crate) async fn list_overview(
    pool: &PgPool,
    is_verified: Option<bool>,
    batch_id: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<StudentOverviewRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentOverviewRow>(
        "SELECT sp.id, sp.user_id, sp.student_id, u.username, u.full_name, sp.phone,
                sp.batch_id, sp.is_active, sp.is_verified, sp.verified_at, sp.enrollment_date
         FROM student_profiles sp
         JOIN users u ON u.id = sp.user_id
         WHERE ($1::boolean IS NULL OR sp.is_verified = $1)
           AND ($2::text IS NULL OR sp.batch_id = $2)
         ORDER BY sp.student_id
         OFFSET $3 LIMIT $4",
    )
    .bind(is_verified)
    .bind(batch_id)
    .bind(skip.max(0))
    .bind(limit.clamp(1, 1000))
    .fetch_all(pool)
    .await
}
