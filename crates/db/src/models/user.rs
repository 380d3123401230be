//! Account entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// Full row from the `users` table.
///
/// Contains the password hash. Never serialize this directly; use
/// [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub telegram_id: Option<i64>,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// DTO for creating a new account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub phone: Option<String>,
    pub telegram_id: Option<i64>,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}
