use sqlx::PgPool;

use crate::db::models::Bulletin;

const COLUMNS: &str = "id, text, is_active, created_at, updated_at";

pub(crate) async fn create(
    pool: &PgPool,
    id: &str,
    text: &str,
    is_active: bool,
    now: time::PrimitiveDateTime,
) -> Result<Bulletin, sqlx::Error> {
    sqlx::query_as::<_, Bulletin>(&format!(
        "INSERT INTO bulletins (id, text, is_active, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(id)
    .bind(text)
    .bind(is_active)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Several rows may be active at once; the most recently updated one wins.
pub(crate) async fn find_displayed(pool: &PgPool) -> Result<Option<Bulletin>, sqlx::Error> {
    sqlx::query_as::<_, Bulletin>(&format!(
        "SELECT {COLUMNS} FROM bulletins
         WHERE is_active = TRUE
         ORDER BY updated_at DESC
         LIMIT 1",
    ))
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Bulletin>, sqlx::Error> {
    sqlx::query_as::<_, Bulletin>(&format!(
        "SELECT {COLUMNS} FROM bulletins ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    text: Option<String>,
    is_active: Option<bool>,
    now: time::PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bulletins SET
            text = COALESCE($1, text),
            is_active = COALESCE($2, is_active),
            updated_at = $3
         WHERE id = $4",
    )
    .bind(text)
    .bind(is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bulletins WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
