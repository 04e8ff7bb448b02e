//! Client core for the movie review application
//!
//! Everything a front end needs apart from rendering: data clients for the
//! backend API, the response envelope decoder, the authentication session,
//! review filtering and sorting, the review submission flow, infinite-scroll
//! pagination and the detail page loader.
//!
//! ```rust,no_run
//! use client::{ApiClient, ClientConfig, MovieClient, MovieFeed, InfiniteScroll};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = ApiClient::new(ClientConfig::from_env()?)?;
//!     let movies = MovieClient::new(api);
//!
//!     let mut popular = InfiniteScroll::new(MovieFeed::Popular);
//!     popular.load_next(&movies).await;
//!     println!("{} movies loaded", popular.items().len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod movies;
pub mod page;
pub mod pagination;
pub mod reviews;
pub mod session;
pub mod submission;
pub mod users;
pub mod view;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use movies::{MovieApi, MovieClient, MovieFeed};
pub use page::{LoadState, Liveness, MovieDetailPage};
pub use pagination::{InfiniteScroll, LoadOutcome};
pub use reviews::{ReviewApi, ReviewClient, delete_review};
pub use session::{AuthToken, Session};
pub use submission::{ReviewComposer, ReviewForm, SubmissionState, SubmitError, SubmitOutcome};
pub use users::{UserApi, UserClient};
pub use view::{ReviewFilter, ReviewQuery, ReviewSort, derive_view};
