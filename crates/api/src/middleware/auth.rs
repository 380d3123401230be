//! Session-cookie authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::roles::{role_for, ROLE_ADMIN};
use storefront_core::types::DbId;
use storefront_db::models::user::UserResponse;
use storefront_db::repositories::{SessionRepo, UserRepo};

use crate::auth::session::{hash_session_token, session_token_from_headers};
use crate::error::AppError;
use crate::state::AppState;

/// An account resolved from an active session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// `"admin"` or `"customer"`.
    pub role: String,
    pub name: String,
    pub phone: Option<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.user_id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            is_admin: self.is_admin(),
        }
    }
}

/// Who is making the request. Built once per request from the session cookie
/// and handed explicitly to the operations that care about ownership.
///
/// A missing, unknown, expired or revoked session yields an anonymous context;
/// this extractor never rejects on auth grounds.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub account: Option<AuthUser>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The authenticated account's id, if any.
    pub fn account_id(&self) -> Option<DbId> {
        self.account.as_ref().map(|a| a.user_id)
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) =
            session_token_from_headers(&parts.headers, &state.config.session.cookie_name)
        else {
            return Ok(Self::anonymous());
        };

        let hash = hash_session_token(&token);
        let Some(session) = SessionRepo::find_active_by_token_hash(&state.pool, &hash).await?
        else {
            return Ok(Self::anonymous());
        };

        let Some(user) = UserRepo::find_by_id(&state.pool, session.user_id).await? else {
            return Ok(Self::anonymous());
        };

        Ok(Self {
            account: Some(AuthUser {
                user_id: user.id,
                role: role_for(user.is_admin).to_string(),
                name: user.name,
                phone: user.phone,
            }),
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        RequestContext::from_request_parts(parts, state)
            .await?
            .account
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthenticated.".into())))
    }
}
