//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod material_repo;
pub mod order_repo;
pub mod product_repo;
pub mod session_repo;
pub mod user_repo;

pub use material_repo::MaterialRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
