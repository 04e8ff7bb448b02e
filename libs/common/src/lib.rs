//! Common library for the movie review application
//!
//! This crate provides the infrastructure shared by the backend: the
//! PostgreSQL connection pool, the Redis cache used for upstream movie
//! responses, and the error types for both.

pub mod cache;
pub mod database;
pub mod error;

/// Example usage of the database and cache modules
///
/// ```rust,no_run
/// use common::cache::{RedisCache, RedisConfig};
/// use common::database::{DatabaseConfig, health_check, init_pool};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = init_pool(&DatabaseConfig::from_env()?).await?;
///     println!("Database healthy: {}", health_check(&pool).await?);
///
///     let cache = RedisCache::new(&RedisConfig::from_env()?)?;
///     cache.set_json("movies:popular:1", &vec![1, 2, 3], Some(60)).await?;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
