//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database and Redis cache are
//! properly configured and accessible from the application. They need live
//! services and are ignored by default.

use common::{
    cache::{RedisCache, RedisConfig},
    database::{DatabaseConfig, health_check, init_pool},
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires running PostgreSQL and Redis"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    let cache = RedisCache::new(&RedisConfig::from_env()?)?;
    assert!(cache.health_check().await?, "Redis health check failed");

    let key = "integration_test_key";
    cache.set_json(key, &serde_json::json!({"page": 1}), Some(10)).await?;

    let retrieved: Option<serde_json::Value> = cache.get_json(key).await?;
    assert_eq!(retrieved, Some(serde_json::json!({"page": 1})));

    cache.delete(key).await?;
    let retrieved: Option<serde_json::Value> = cache.get_json(key).await?;
    assert_eq!(retrieved, None, "Redis delete operation failed");

    Ok(())
}
