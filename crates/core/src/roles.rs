//! Well-known role names.
//!
//! Accounts carry a single `is_admin` flag; these names are what the
//! request context reports for each side of it.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

/// Map the `is_admin` column to a role name.
pub fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_CUSTOMER
    }
}
