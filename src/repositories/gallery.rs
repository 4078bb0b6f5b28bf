use sqlx::PgPool;

use crate::db::models::GalleryImage;

const COLUMNS: &str = "id, image_key, caption, created_at";

pub(crate) async fn create(
    pool: &PgPool,
    id: &str,
    image_key: &str,
    caption: &str,
    created_at: time::PrimitiveDateTime,
) -> Result<GalleryImage, sqlx::Error> {
    sqlx::query_as::<_, GalleryImage>(&format!(
        "INSERT INTO gallery_images (id, image_key, caption, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(id)
    .bind(image_key)
    .bind(caption)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

/// Newest first; `limit` of zero means no limit.
pub(crate) async fn list(pool: &PgPool, limit: i64) -> Result<Vec<GalleryImage>, sqlx::Error> {
    sqlx::query_as::<_, GalleryImage>(&format!(
        "SELECT {COLUMNS} FROM gallery_images
         ORDER BY created_at DESC
         LIMIT CASE WHEN $1 > 0 THEN $1 ELSE NULL END",
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM gallery_images WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
