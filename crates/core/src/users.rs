//! Account rules shared by registration and login.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::validation::FieldErrors;

/// Name given to accounts registered without one.
pub const DEFAULT_ACCOUNT_NAME: &str = "Customer";

/// Login failure message. Identical for unknown phone and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid phone number or password.";

pub const PHONE_TAKEN: &str = "The phone has already been taken.";
pub const TELEGRAM_ID_TAKEN: &str = "The telegram id has already been taken.";

/// Resolve the display name for a new account.
pub fn account_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_ACCOUNT_NAME.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Body of `POST /auth/register`, sent by the Telegram bot.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, length(max = 50))]
    pub phone: Option<String>,
    #[validate(
        required,
        length(min = 6, message = "The password field must be at least 6 characters.")
    )]
    pub password: Option<String>,
    #[validate(required)]
    pub telegram_id: Option<i64>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

/// A registration that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub phone: String,
    pub password: String,
    pub telegram_id: i64,
    pub name: String,
}

impl RegisterRequest {
    /// Check the field rules. Uniqueness is checked against storage by the caller.
    pub fn validate_registration(self) -> Result<Registration, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from_validator(&e),
        };
        if matches!(self.phone.as_deref().map(str::trim), Some("")) {
            errors.add("phone", "The phone field is required.");
        }
        errors.into_result()?;

        Ok(Registration {
            phone: self.phone.unwrap_or_default().trim().to_string(),
            password: self.password.unwrap_or_default(),
            telegram_id: self.telegram_id.unwrap_or_default(),
            name: account_name(self.name.as_deref()),
        })
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required)]
    pub phone: Option<String>,
    #[validate(required)]
    pub password: Option<String>,
    /// Extend the session to the long-lived lifetime.
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
    pub remember: bool,
}

impl LoginRequest {
    pub fn validate_credentials(self) -> Result<Credentials, CoreError> {
        self.validate()?;
        Ok(Credentials {
            phone: self.phone.unwrap_or_default().trim().to_string(),
            password: self.password.unwrap_or_default(),
            remember: self.remember,
        })
    }
}
