//! Domain logic for the storefront: types, errors, catalog and order rules.
//!
//! This crate performs no I/O so it can be shared by the repository layer,
//! the HTTP layer, and their tests.

pub mod catalog;
pub mod error;
pub mod material;
pub mod order;
pub mod pagination;
pub mod product;
pub mod roles;
pub mod types;
pub mod users;
pub mod validation;
