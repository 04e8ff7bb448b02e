//! Account endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use models::{LoginRequest, LoginResponse, RegisterRequest, User, wire::ApiResponse};
use tracing::{info, warn};

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    repositories::is_unique_violation,
    state::AppState,
    validation::{validate_email, validate_password, validate_username},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let payload = RegisterRequest {
        username: payload.username.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        password: payload.password,
    };

    validate_username(&payload.username).map_err(ApiError::BadRequest)?;
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    let repository = &state.user_repository;

    let username_taken = repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| ApiError::internal("Failed to look up username", e))?
        .is_some();
    if username_taken {
        return Err(ApiError::Conflict("Username is already taken".to_string()));
    }

    let email_taken = repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::internal("Failed to look up email", e))?
        .is_some();
    if email_taken {
        return Err(ApiError::Conflict("Email is already registered".to_string()));
    }

    let record = repository
        .create(&payload)
        .await
        .map_err(|e| {
            // a concurrent registration can win the race past the checks above
            if is_unique_violation(&e) {
                ApiError::Conflict("Username or email is already registered".to_string())
            } else {
                ApiError::internal("Failed to create user", e)
            }
        })?;

    info!("Registered user {}", record.username);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(User::from(record)))))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let username = payload.username.trim();

    if !state.login_limiter.is_allowed(username).await {
        warn!("Login rate limit hit for {}", username);
        return Err(ApiError::TooManyRequests);
    }

    let record = state
        .user_repository
        .find_by_username(username)
        .await
        .map_err(|e| ApiError::internal("Failed to look up user", e))?
        .ok_or(ApiError::Unauthorized)?;

    let valid = state
        .user_repository
        .verify_password(&record, &payload.password)
        .map_err(|e| ApiError::internal("Failed to verify password", e))?;
    if !valid {
        return Err(ApiError::Unauthorized);
    }

    state.login_limiter.reset(username).await;

    let user = User::from(record);
    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| ApiError::internal("Failed to issue token", e))?;

    info!("User {} logged in", user.username);
    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.expiry(),
        user,
    })))
}

async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let record = state
        .user_repository
        .find_by_id(user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to load profile", e))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(User::from(record))))
}
