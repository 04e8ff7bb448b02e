//! Movie endpoints proxied to the upstream movie database

use axum::{Json, Router, extract::State, routing::get};
use models::{Movie, MoviePage, wire::ApiResponse};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiPath, ApiQuery},
    payloads::{PageQuery, SearchQuery},
    state::AppState,
    tmdb::{MAX_PAGE, is_servable_page},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/popular", get(popular))
        .route("/top-rated", get(top_rated))
        .route("/search", get(search))
        .route("/:id", get(detail))
}

/// Missing page means the first one; pages past the upstream limit are refused
fn requested_page(page: Option<u32>) -> ApiResult<u32> {
    let page = page.unwrap_or(1);
    if !is_servable_page(page) {
        return Err(ApiError::BadRequest(format!(
            "page must be between 1 and {}",
            MAX_PAGE
        )));
    }
    Ok(page)
}

async fn popular(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<ApiResponse<MoviePage>>> {
    let page = state.tmdb.popular(requested_page(query.page)?).await?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn top_rated(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<ApiResponse<MoviePage>>> {
    let page = state.tmdb.top_rated(requested_page(query.page)?).await?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<ApiResponse<MoviePage>>> {
    let term = query.query.trim();
    if term.is_empty() {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    }

    let page = state.tmdb.search(term, requested_page(query.page)?).await?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Movie>>> {
    if id <= 0 {
        return Err(ApiError::BadRequest("Invalid movie id".to_string()));
    }

    let movie = state.tmdb.detail(id).await?;
    Ok(Json(ApiResponse::ok(movie)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_page() {
        assert_eq!(requested_page(None).unwrap(), 1);
        assert_eq!(requested_page(Some(MAX_PAGE)).unwrap(), MAX_PAGE);
        assert!(matches!(requested_page(Some(0)), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            requested_page(Some(MAX_PAGE + 1)),
            Err(ApiError::BadRequest(_))
        ));
    }
}
