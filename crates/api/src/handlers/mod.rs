pub mod admin_order;
pub mod auth;
pub mod catalog;
pub mod order;
