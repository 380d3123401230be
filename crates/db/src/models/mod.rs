//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs for inserts where the table is written to
//! - Serializable response shapes where the row is not exposed directly

pub mod material;
pub mod order;
pub mod product;
pub mod session;
pub mod user;
