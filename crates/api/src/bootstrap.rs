//! Startup provisioning of the admin account.

use storefront_db::models::user::CreateUser;
use storefront_db::repositories::UserRepo;
use storefront_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminAccount;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless one with that phone exists.
///
/// Returns `true` when a new account was created. An existing account is left
/// untouched, including its password and admin flag.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminAccount) -> AppResult<bool> {
    if let Some(existing) = UserRepo::find_by_phone(pool, &admin.phone).await? {
        tracing::debug!(user_id = existing.id, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.clone(),
            phone: Some(admin.phone.clone()),
            telegram_id: None,
            email: None,
            password_hash,
            is_admin: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Admin account created");
    Ok(true)
}
