//! Authentication and authorization extractors.
//!
//! - [`auth::RequestContext`] -- The caller's account, if a valid session cookie is present.
//! - [`auth::AuthUser`] -- Requires a logged-in account (401 otherwise).
//! - [`rbac::RequireAdmin`] -- Requires an admin account (403 otherwise).

pub mod auth;
pub mod rbac;
