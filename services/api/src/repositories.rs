//! Repositories for database operations

pub mod review;
pub mod user;

pub use review::ReviewRepository;
pub use user::{UserRepository, is_unique_violation};
