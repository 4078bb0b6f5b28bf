use sqlx::PgPool;

use crate::db::models::Batch;

const COLUMNS: &str =
    "id, name, start_date, end_date, is_active, description, created_at, updated_at";

pub(crate) struct CreateBatch<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) start_date: time::Date,
    pub(crate) end_date: time::Date,
    pub(crate) is_active: bool,
    pub(crate) description: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) struct UpdateBatch {
    pub(crate) name: Option<String>,
    pub(crate) start_date: Option<time::Date>,
    pub(crate) end_date: Option<time::Date>,
    pub(crate) is_active: Option<bool>,
    pub(crate) description: Option<String>,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateBatch<'_>) -> Result<Batch, sqlx::Error> {
    sqlx::query_as::<_, Batch>(&format!(
        "INSERT INTO batches (
            id, name, start_date, end_date, is_active, description, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.is_active)
    .bind(params.description)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Batch>, sqlx::Error> {
    sqlx::query_as::<_, Batch>(&format!("SELECT {COLUMNS} FROM batches WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn exists_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT id FROM batches WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list(pool: &PgPool, only_active: bool) -> Result<Vec<Batch>, sqlx::Error> {
    sqlx::query_as::<_, Batch>(&format!(
        "SELECT {COLUMNS} FROM batches
         WHERE ($1 = FALSE OR is_active = TRUE)
         ORDER BY start_date DESC",
    ))
    .bind(only_active)
    .fetch_all(pool)
    .await
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateBatch,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE batches SET
            name = COALESCE($1, name),
            start_date = COALESCE($2, start_date),
            end_date = COALESCE($3, end_date),
            is_active = COALESCE($4, is_active),
            description = COALESCE($5, description),
            updated_at = $6
         WHERE id = $7",
    )
    .bind(params.name)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.is_active)
    .bind(params.description)
    .bind(params.updated_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM batches WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
