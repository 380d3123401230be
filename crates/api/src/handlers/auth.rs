//! Handlers for the `/auth` resource (register, login, logout, current user).

use axum::extract::State;
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_core::users::{
    LoginRequest, RegisterRequest, INVALID_CREDENTIALS, PHONE_TAKEN, TELEGRAM_ID_TAKEN,
};
use storefront_core::validation::FieldErrors;
use storefront_db::models::session::CreateSession;
use storefront_db::models::user::{CreateUser, UserResponse};
use storefront_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::auth::session::{
    expired_session_cookie, generate_session_token, hash_session_token, session_cookie,
    session_token_from_headers,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::RequestContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `{authenticated: false}` or `{authenticated: true, user}`.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Called by the Telegram bot after the user shares their contact.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = input.validate_registration()?;

    let mut taken = FieldErrors::new();
    if UserRepo::find_by_phone(&state.pool, &registration.phone)
        .await?
        .is_some()
    {
        taken.add("phone", PHONE_TAKEN);
    }
    if UserRepo::find_by_telegram_id(&state.pool, registration.telegram_id)
        .await?
        .is_some()
    {
        taken.add("telegram_id", TELEGRAM_ID_TAKEN);
    }
    taken.into_result()?;

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: registration.name,
            phone: Some(registration.phone),
            telegram_id: Some(registration.telegram_id),
            email: None,
            password_hash,
            is_admin: false,
        },
    )
    .await
    .map_err(duplicate_account_error)?;

    tracing::info!(user_id = user.id, telegram_id = ?user.telegram_id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully",
            user: RegisteredUser {
                id: user.id,
                name: user.name,
                phone: user.phone,
            },
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown phone and wrong password fail with the same body after the same
/// Argon2 work.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Response> {
    let credentials = input.validate_credentials()?;

    let Some(user) = UserRepo::find_by_phone(&state.pool, &credentials.phone).await? else {
        verify_against_dummy(&credentials.password);
        tracing::debug!("Login rejected: unknown phone");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let lifetime = state.config.session.lifetime(credentials.remember);
    let (token, token_hash) = generate_session_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at: Utc::now() + lifetime,
            user_agent: headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            ip_address: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, remember = credentials.remember, "User logged in");

    let cookie = session_cookie(&state.config.session, &token, lifetime);
    let body = LoginResponse {
        success: true,
        user: UserResponse::from(&user),
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// POST /api/auth/logout
///
/// Revokes the current session if there is one and clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = session_token_from_headers(&headers, &state.config.session.cookie_name) {
        let revoked =
            SessionRepo::revoke_by_token_hash(&state.pool, &hash_session_token(&token)).await?;
        tracing::debug!(revoked, "Session logout");
    }

    let cookie = expired_session_cookie(&state.config.session);
    let body = LogoutResponse {
        success: true,
        message: "Logged out successfully",
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// GET /api/auth/user
pub async fn current_user(ctx: RequestContext) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        authenticated: ctx.account.is_some(),
        user: ctx.account.as_ref().map(|a| a.to_response()),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::InvalidFields(FieldErrors::single(
        "phone",
        INVALID_CREDENTIALS,
    )))
}

/// A concurrent registration can slip past the up-front checks; report the
/// violated unique constraint against its field.
fn duplicate_account_error(err: sqlx::Error) -> AppError {
    let field = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .and_then(|constraint| match constraint {
            "uq_users_phone" => Some(("phone", PHONE_TAKEN)),
            "uq_users_telegram_id" => Some(("telegram_id", TELEGRAM_ID_TAKEN)),
            _ => None,
        });

    match field {
        Some((field, message)) => {
            AppError::Core(CoreError::InvalidFields(FieldErrors::single(field, message)))
        }
        None => AppError::Database(err),
    }
}
