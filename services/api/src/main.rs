use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod auth;
mod config;
mod error;
mod extract;
mod jwt;
mod payloads;
mod rate_limiter;
mod repositories;
mod routes;
mod state;
mod tmdb;
mod validation;

use common::{
    cache::{RedisCache, RedisConfig},
    database::{DatabaseConfig, init_pool},
    error::DatabaseError,
};
use tokio::net::TcpListener;

use crate::{
    config::{ServiceConfig, TmdbConfig},
    jwt::{JwtConfig, JwtService},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{ReviewRepository, UserRepository},
    state::AppState,
    tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting movie review API service");

    let service_config = ServiceConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    let cache = RedisCache::new(&RedisConfig::from_env()?)?;
    match cache.health_check().await {
        Ok(true) => info!("Redis connection successful"),
        _ => tracing::warn!("Redis unavailable, movie responses will not be cached"),
    }

    let tmdb = TmdbClient::new(TmdbConfig::from_env()?, cache)?;
    let jwt_service = JwtService::new(&JwtConfig::from_env()?);

    let app_state = AppState {
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        review_repository: ReviewRepository::new(pool),
        tmdb,
        login_limiter: RateLimiter::new(RateLimiterConfig::default()),
    };

    // Start the web server
    let app = routes::create_router(app_state, &service_config.allowed_origins);

    let listener = TcpListener::bind(&service_config.bind_addr).await?;
    info!("API service listening on {}", service_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
