use sqlx::PgPool;

use crate::db::models::{Branch, BranchPhone};

const BRANCH_COLUMNS: &str = "\
    id, name, image_key, phone_number, address, google_map_link, is_active, created_at";

const PHONE_COLUMNS: &str = "id, label, phone_number, is_active, order_index";

pub(crate) struct CreateBranch<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) image_key: Option<&'a str>,
    pub(crate) phone_number: &'a str,
    pub(crate) address: &'a str,
    pub(crate) google_map_link: &'a str,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateBranch<'_>) -> Result<Branch, sqlx::Error> {
    sqlx::query_as::<_, Branch>(&format!(
        "INSERT INTO branches (
            id, name, image_key, phone_number, address, google_map_link, is_active, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {BRANCH_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.image_key)
    .bind(params.phone_number)
    .bind(params.address)
    .bind(params.google_map_link)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_active(pool: &PgPool) -> Result<Vec<Branch>, sqlx::Error> {
    sqlx::query_as::<_, Branch>(&format!(
        "SELECT {BRANCH_COLUMNS} FROM branches WHERE is_active = TRUE ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Branch>, sqlx::Error> {
    sqlx::query_as::<_, Branch>(&format!("SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) struct UpdateBranch {
    pub(crate) name: Option<String>,
    pub(crate) image_key: Option<String>,
    pub(crate) phone_number: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) google_map_link: Option<String>,
    pub(crate) is_active: Option<bool>,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateBranch,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE branches SET
            name = COALESCE($1, name),
            image_key = COALESCE($2, image_key),
            phone_number = COALESCE($3, phone_number),
            address = COALESCE($4, address),
            google_map_link = COALESCE($5, google_map_link),
            is_active = COALESCE($6, is_active)
         WHERE id = $7",
    )
    .bind(params.name)
    .bind(params.image_key)
    .bind(params.phone_number)
    .bind(params.address)
    .bind(params.google_map_link)
    .bind(params.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM branches WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn create_phone(
    pool: &PgPool,
    id: &str,
    label: &str,
    phone_number: &str,
    order_index: i32,
) -> Result<BranchPhone, sqlx::Error> {
    sqlx::query_as::<_, BranchPhone>(&format!(
        "INSERT INTO branch_phones (id, label, phone_number, is_active, order_index)
         VALUES ($1,$2,$3,TRUE,$4)
         RETURNING {PHONE_COLUMNS}",
    ))
    .bind(id)
    .bind(label)
    .bind(phone_number)
    .bind(order_index)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_active_phones(pool: &PgPool) -> Result<Vec<BranchPhone>, sqlx::Error> {
    sqlx::query_as::<_, BranchPhone>(&format!(
        "SELECT {PHONE_COLUMNS} FROM branch_phones
         WHERE is_active = TRUE
         ORDER BY order_index, label",
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn delete_phone(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM branch_phones WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
