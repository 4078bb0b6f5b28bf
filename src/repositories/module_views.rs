use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::ModuleView;

const COLUMNS: &str = "id, student_id, module_id, first_viewed_at, last_viewed_at";

/// Get-or-create the view receipt for a student opening a module; repeat
/// visits only advance `last_viewed_at`.
pub(crate) async fn record_view(
    pool: &PgPool,
    student_id: &str,
    module_id: &str,
    viewed_at: time::PrimitiveDateTime,
) -> Result<ModuleView, sqlx::Error> {
    sqlx::query_as::<_, ModuleView>(&format!(
        "INSERT INTO module_views (id, student_id, module_id, first_viewed_at, last_viewed_at)
         VALUES ($1,$2,$3,$4,$4)
         ON CONFLICT (student_id, module_id)
         DO UPDATE SET last_viewed_at = EXCLUDED.last_viewed_at
         RETURNING {COLUMNS}",
    ))
    .bind(Uuid::new_v4().to_string())
    .bind(student_id)
    .bind(module_id)
    .bind(viewed_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_for_student_module(
    pool: &PgPool,
    student_id: &str,
    module_id: &str,
) -> Result<Option<ModuleView>, sqlx::Error> {
    sqlx::query_as::<_, ModuleView>(&format!(
        "SELECT {COLUMNS} FROM module_views WHERE student_id = $1 AND module_id = $2"
    ))
    .bind(student_id)
    .bind(module_id)
    .fetch_optional(pool)
    .await
}
