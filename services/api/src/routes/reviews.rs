//! Review endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use models::{Review, wire::ApiResponse};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    payloads::CreateReviewRequest,
    state::AppState,
    validation::validate_review,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        // GET takes a movie id, DELETE a review id
        .route("/:id", get(list_reviews).delete(delete_review))
}

async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Vec<Review>>>> {
    let reviews = state
        .review_repository
        .list_by_movie(movie_id)
        .await
        .map_err(|e| ApiError::internal("Failed to list reviews", e))?;

    Ok(Json(ApiResponse::ok(reviews)))
}

async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateReviewRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let new_review = validate_review(&payload).map_err(ApiError::BadRequest)?;

    let review = state
        .review_repository
        .create(user.id, &new_review)
        .await
        .map_err(|e| ApiError::internal("Failed to create review", e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review))))
}

async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let review = state
        .review_repository
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load review", e))?
        .ok_or_else(|| ApiError::NotFound("Review not found".to_string()))?;

    if !review.is_owned_by(user.id) {
        return Err(ApiError::Forbidden(
            "Only the author can delete this review".to_string(),
        ));
    }

    state
        .review_repository
        .delete(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete review", e))?;

    info!("User {} deleted review {}", user.username, id);
    Ok(Json(ApiResponse::ok(json!({ "id": id }))))
}
