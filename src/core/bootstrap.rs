use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;

/// Make sure a staff account exists so the back office is reachable on a
/// fresh deployment. Idempotent across restarts.
pub(crate) async fn ensure_superuser(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_superuser_password.is_empty() {
        tracing::warn!("FIRST_SUPERUSER_PASSWORD not configured; skipping staff account creation");
        return Ok(());
    }

    let username = &admin.first_superuser_username;
    let user = repositories::users::find_by_username(state.db(), username).await?;
    let now = primitive_now_utc();

    if let Some(user) = user {
        let mut needs_update = false;

        let verified = security::verify_optional_password(
            &admin.first_superuser_password,
            user.hashed_password.as_deref(),
        )
        .unwrap_or(false);

        let hashed_password = if verified {
            user.hashed_password.clone()
        } else {
            needs_update = true;
            Some(security::hash_password(&admin.first_superuser_password)?)
        };

        let is_staff = if !user.is_staff {
            needs_update = true;
            true
        } else {
            user.is_staff
        };

        let is_active = if !user.is_active {
            needs_update = true;
            true
        } else {
            user.is_active
        };

        if needs_update {
            sqlx::query(
                "UPDATE users
                 SET hashed_password = $1,
                     is_staff = $2,
                     is_active = $3,
                     updated_at = $4
                 WHERE id = $5",
            )
            .bind(hashed_password)
            .bind(is_staff)
            .bind(is_active)
            .bind(now)
            .bind(user.id)
            .execute(state.db())
            .await?;

            tracing::info!("Updated default staff account {username}");
        } else {
            tracing::info!("Default staff account already up to date");
        }

        return Ok(());
    }

    let hashed_password = security::hash_password(&admin.first_superuser_password)?;

    sqlx::query(
        "INSERT INTO users (
            id, username, email, hashed_password, full_name, is_staff, is_active,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(username)
    .bind(Option::<String>::None)
    .bind(hashed_password)
    .bind("Site Administrator")
    .bind(true)
    .bind(true)
    .bind(now)
    .bind(now)
    .execute(state.db())
    .await?;

    tracing::info!("Created default staff account {username}");
    Ok(())
}
