//! Movie detail page state

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use models::{Movie, Review};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{
    error::{ClientError, ClientResult},
    movies::MovieApi,
    reviews::{self, ReviewApi},
    session::Session,
    submission::{ReviewComposer, SubmitError},
    view::ReviewQuery,
};

/// Liveness flag of a view
///
/// Clones share the flag. Once [`Liveness::teardown`] is called, results
/// that arrive later must not be applied.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn teardown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Loading/error state of a fetched value
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Results of loading a detail page
#[derive(Debug)]
pub struct DetailSnapshot {
    pub movie: ClientResult<Movie>,
    pub reviews: ClientResult<Vec<Review>>,
}

/// State of the movie detail page
#[derive(Debug)]
pub struct MovieDetailPage {
    movie_id: i64,
    movie: LoadState<Movie>,
    reviews: Vec<Review>,
    pub query: ReviewQuery,
    pub composer: ReviewComposer,
    liveness: Liveness,
}

impl MovieDetailPage {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            movie: LoadState::Loading,
            reviews: Vec::new(),
            query: ReviewQuery::default(),
            composer: ReviewComposer::new(movie_id),
            liveness: Liveness::new(),
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn movie(&self) -> &LoadState<Movie> {
        &self.movie
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Handle used to tear the view down from elsewhere
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Reviews after the current filter and sort
    pub fn visible_reviews(&self) -> Vec<Review> {
        self.query.apply(&self.reviews)
    }

    /// Fetch the movie and its reviews concurrently
    pub async fn fetch(movies: &dyn MovieApi, reviews: &dyn ReviewApi, movie_id: i64) -> DetailSnapshot {
        let (movie, reviews) = tokio::join!(movies.fetch_detail(movie_id), reviews.list(movie_id));
        DetailSnapshot { movie, reviews }
    }

    /// Apply fetched results unless the view has been torn down
    ///
    /// Returns whether the snapshot was applied.
    pub fn apply(&mut self, snapshot: DetailSnapshot) -> bool {
        if !self.liveness.is_live() {
            debug!("Dropping results for movie {} after teardown", self.movie_id);
            return false;
        }

        self.movie = match snapshot.movie {
            Ok(movie) => LoadState::Ready(movie),
            Err(e) => {
                error!("Failed to load movie {}: {}", self.movie_id, e);
                LoadState::Failed(e.to_string())
            }
        };

        match snapshot.reviews {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => {
                warn!("Failed to load reviews for movie {}: {}", self.movie_id, e);
                self.reviews.clear();
            }
        }

        true
    }

    pub async fn load(&mut self, movies: &dyn MovieApi, reviews: &dyn ReviewApi) -> bool {
        let snapshot = Self::fetch(movies, reviews, self.movie_id).await;
        self.apply(snapshot)
    }

    /// Reload the review list
    pub async fn refresh_reviews(&mut self, api: &dyn ReviewApi) -> ClientResult<()> {
        let reviews = api.list(self.movie_id).await?;
        if self.liveness.is_live() {
            self.reviews = reviews;
        }
        Ok(())
    }

    /// Submit the composer's review and replace the list with the refetch
    pub async fn submit_review(&mut self, session: &Session, api: &dyn ReviewApi) -> Result<(), SubmitError> {
        let reviews = self.composer.submit(session, api).await?;
        if self.liveness.is_live() {
            self.reviews = reviews;
        }
        Ok(())
    }

    /// Delete one of the listed reviews, then reload the list
    pub async fn delete_review(&mut self, session: &Session, review_id: Uuid, api: &dyn ReviewApi) -> ClientResult<()> {
        let review = self
            .reviews
            .iter()
            .find(|r| r.id == review_id)
            .cloned()
            .ok_or(ClientError::UnknownReview(review_id))?;

        reviews::delete_review(session, &review, api).await?;
        self.refresh_reviews(api).await
    }
}
