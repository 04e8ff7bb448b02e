//! Movie data client

use std::fmt;

use async_trait::async_trait;
use models::{Movie, MoviePage};
use tracing::debug;

use crate::{
    envelope::{decode_movie, decode_movie_page},
    error::ClientResult,
    http::ApiClient,
};

/// A paginated movie listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFeed {
    Popular,
    TopRated,
    Search(String),
}

impl fmt::Display for MovieFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieFeed::Popular => f.write_str("popular"),
            MovieFeed::TopRated => f.write_str("top-rated"),
            MovieFeed::Search(query) => write!(f, "search \"{}\"", query),
        }
    }
}

/// Read access to movie metadata
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn fetch_page(&self, feed: &MovieFeed, page: u32) -> ClientResult<MoviePage>;
    async fn fetch_detail(&self, id: i64) -> ClientResult<Movie>;
}

/// Client for `/movies/*`
#[derive(Clone, Debug)]
pub struct MovieClient {
    api: ApiClient,
}

impl MovieClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_popular(&self, page: u32) -> ClientResult<MoviePage> {
        self.fetch_page(&MovieFeed::Popular, page).await
    }

    pub async fn fetch_top_rated(&self, page: u32) -> ClientResult<MoviePage> {
        self.fetch_page(&MovieFeed::TopRated, page).await
    }

    pub async fn search(&self, query: &str, page: u32) -> ClientResult<MoviePage> {
        self.fetch_page(&MovieFeed::Search(query.to_string()), page)
            .await
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn fetch_page(&self, feed: &MovieFeed, page: u32) -> ClientResult<MoviePage> {
        debug!("Fetching {} movies, page {}", feed, page);

        let request = match feed {
            MovieFeed::Popular => self.api.get("/movies/popular").query(&[("page", page)]),
            MovieFeed::TopRated => self.api.get("/movies/top-rated").query(&[("page", page)]),
            MovieFeed::Search(query) => self
                .api
                .get("/movies/search")
                .query(&[("query", query.as_str())])
                .query(&[("page", page)]),
        };

        let body = self.api.send(request).await?;
        Ok(decode_movie_page(&body)?)
    }

    async fn fetch_detail(&self, id: i64) -> ClientResult<Movie> {
        debug!("Fetching movie detail {}", id);

        let body = self
            .api
            .send(self.api.get(&format!("/movies/{}", id)))
            .await?;
        Ok(decode_movie(&body)?)
    }
}
