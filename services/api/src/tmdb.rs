//! Upstream movie database client
//!
//! Listings report at most `MAX_PAGE` pages, the deepest page the upstream
//! serves. Responses are cached in Redis for `MOVIE_CACHE_TTL` seconds. The cache is
//! best effort: when Redis is unavailable the request goes straight to the
//! upstream API.

use std::sync::Arc;
use std::time::Duration;

use common::cache::RedisCache;
use models::{Movie, MoviePage};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TmdbConfig;

/// Highest page number the upstream API serves
pub const MAX_PAGE: u32 = 500;

/// Upstream failures
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Upstream returned status {0}")]
    Upstream(u16),

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Movie database client with a read-through cache
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: Arc<TmdbConfig>,
    cache: RedisCache,
}

impl TmdbClient {
    /// Create a new client
    pub fn new(config: TmdbConfig, cache: RedisCache) -> Result<Self, TmdbError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(TmdbClient {
            client,
            config: Arc::new(config),
            cache,
        })
    }

    /// Popular movies
    pub async fn popular(&self, page: u32) -> Result<MoviePage, TmdbError> {
        let page = page.to_string();
        self.get_page("/movie/popular", &[("page", page.as_str())])
            .await
    }

    /// Top rated movies
    pub async fn top_rated(&self, page: u32) -> Result<MoviePage, TmdbError> {
        let page = page.to_string();
        self.get_page("/movie/top_rated", &[("page", page.as_str())])
            .await
    }

    /// Search movies by title
    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        let page = page.to_string();
        self.get_page(
            "/search/movie",
            &[("query", query), ("page", page.as_str())],
        )
        .await
    }

    /// Movie details including videos
    pub async fn detail(&self, id: i64) -> Result<Movie, TmdbError> {
        self.get(&format!("/movie/{}", id), &[("append_to_response", "videos")])
            .await
    }

    async fn get_page(&self, path: &str, query: &[(&str, &str)]) -> Result<MoviePage, TmdbError> {
        let page = self.get(path, query).await?;
        Ok(cap_total_pages(page))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let key = cache_key(&self.config.language, path, query);

        match self.cache.get_json::<Value>(&key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for {}", key);
                return Ok(serde_json::from_value(cached)?);
            }
            Ok(None) => {}
            Err(e) => warn!("Movie cache unavailable, bypassing: {}", e),
        }

        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(query)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(TmdbError::NotFound),
            status => return Err(TmdbError::Upstream(status.as_u16())),
        }

        let body: Value = response.json().await?;

        if let Err(e) = self
            .cache
            .set_json(&key, &body, Some(self.config.cache_ttl))
            .await
        {
            warn!("Failed to cache {}: {}", key, e);
        }

        Ok(serde_json::from_value(body)?)
    }
}

/// Whether the upstream serves `page`
pub fn is_servable_page(page: u32) -> bool {
    (1..=MAX_PAGE).contains(&page)
}

/// Listings report far more pages than the upstream will serve
fn cap_total_pages(mut page: MoviePage) -> MoviePage {
    page.total_pages = page.total_pages.min(MAX_PAGE);
    page
}

fn cache_key(language: &str, path: &str, query: &[(&str, &str)]) -> String {
    let params = query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("tmdb:{}:{}?{}", language, path, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, routing::get};
    use common::cache::RedisConfig;
    use serde_json::json;
    use std::collections::HashMap;

    /// Upstream that reports far more pages than it serves
    async fn deep_listing_upstream() -> String {
        let app = Router::new().route(
            "/movie/popular",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
                Json(json!({
                    "page": page,
                    "results": [{"id": page, "title": "stub"}],
                    "total_pages": 48000,
                    "total_results": 960000
                }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> TmdbClient {
        // nothing listens on port 1, so every cache call fails and is bypassed
        let cache = RedisCache::new(&RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            key_prefix: "tmdb-test".to_string(),
        })
        .unwrap();

        TmdbClient::new(
            TmdbConfig {
                api_key: "test".to_string(),
                base_url,
                language: "ko-KR".to_string(),
                cache_ttl: 1,
            },
            cache,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_last_servable_page_ends_the_listing() {
        let tmdb = client_for(deep_listing_upstream().await);

        let first = tmdb.popular(1).await.unwrap();
        assert_eq!(first.total_pages, MAX_PAGE);

        let last = tmdb.popular(MAX_PAGE).await.unwrap();
        assert_eq!(last.page, MAX_PAGE);
        assert_eq!(last.results[0].id, i64::from(MAX_PAGE));
        // a scroller at the last page must see nothing more to load
        assert!(last.page >= last.total_pages);
    }

    #[test]
    fn test_servable_pages() {
        assert!(!is_servable_page(0));
        assert!(is_servable_page(1));
        assert!(is_servable_page(MAX_PAGE));
        assert!(!is_servable_page(MAX_PAGE + 1));
    }

    #[test]
    fn test_total_pages_capped_to_servable_range() {
        let listing: MoviePage = serde_json::from_value(serde_json::json!({
            "page": 500,
            "results": [{"id": 500, "title": "마지막"}],
            "total_pages": 48000,
            "total_results": 960000
        }))
        .unwrap();

        let capped = cap_total_pages(listing);
        assert_eq!(capped.total_pages, MAX_PAGE);
        assert_eq!(capped.page, 500);
        assert_eq!(capped.total_results, 960000);

        let short = cap_total_pages(MoviePage::single(Vec::new()));
        assert_eq!(short.total_pages, 1);
    }

    #[test]
    fn test_cache_key_includes_language_and_query() {
        assert_eq!(
            cache_key("ko-KR", "/search/movie", &[("query", "괴물"), ("page", "2")]),
            "tmdb:ko-KR:/search/movie?query=괴물&page=2"
        );
        assert_ne!(
            cache_key("ko-KR", "/movie/popular", &[("page", "1")]),
            cache_key("en-US", "/movie/popular", &[("page", "1")])
        );
    }
}
