use sqlx::PgPool;

use crate::db::models::Announcement;

const COLUMNS: &str = "id, title, content, batch_id, is_global, is_active, created_at";

pub(crate) struct CreateAnnouncement<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) content: &'a str,
    pub(crate) batch_id: Option<&'a str>,
    pub(crate) is_global: bool,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAnnouncement<'_>,
) -> Result<Announcement, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!(
        "INSERT INTO announcements (id, title, content, batch_id, is_global, is_active, created_at)
         VALUES ($1,$2,$3,$4,$5,$6,$7)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.content)
    .bind(params.batch_id)
    .bind(params.is_global)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

/// Announcements a student should see: global ones plus those targeted at
/// the student's batch. `limit` of zero means no limit.
pub(crate) async fn list_visible(
    pool: &PgPool,
    batch_id: Option<&str>,
    limit: i64,
) -> Result<Vec<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {COLUMNS} FROM announcements
         WHERE is_active = TRUE
           AND (is_global = TRUE OR ($1::text IS NOT NULL AND batch_id = $1))
         ORDER BY created_at DESC
         LIMIT CASE WHEN $2 > 0 THEN $2 ELSE NULL END",
    ))
    .bind(batch_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {COLUMNS} FROM announcements ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!("SELECT {COLUMNS} FROM announcements WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) struct UpdateAnnouncement {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) is_global: Option<bool>,
    pub(crate) is_active: Option<bool>,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateAnnouncement,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE announcements SET
            title = COALESCE($1, title),
            content = COALESCE($2, content),
            is_global = COALESCE($3, is_global),
            is_active = COALESCE($4, is_active)
         WHERE id = $5",
    )
    .bind(params.title)
    .bind(params.content)
    .bind(params.is_global)
    .bind(params.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM announcements WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
