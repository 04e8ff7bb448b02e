//! Application state shared across handlers

use crate::{
    jwt::JwtService,
    rate_limiter::RateLimiter,
    repositories::{ReviewRepository, UserRepository},
    tmdb::TmdbClient,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub review_repository: ReviewRepository,
    pub tmdb: TmdbClient,
    pub login_limiter: RateLimiter,
}
