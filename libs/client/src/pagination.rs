//! Infinite-scroll pagination for movie listings

use models::{Movie, MoviePage};
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    movies::{MovieApi, MovieFeed},
};

/// What a call to [`InfiniteScroll::load_next`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing more to load, or a load is already running
    Skipped,
    /// A page arrived with this many movies
    Appended(usize),
    /// The fetch failed; the same page will be requested next time
    Failed,
}

/// Infinite-scroll state for one movie feed
///
/// Pages are appended in the order received. Movies repeated across pages
/// are kept as-is.
#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    feed: MovieFeed,
    current_page: u32,
    has_more: bool,
    is_loading_more: bool,
    items: Vec<Movie>,
}

impl InfiniteScroll {
    /// Empty state; the first sentinel hit loads page 1
    pub fn new(feed: MovieFeed) -> Self {
        Self {
            feed,
            current_page: 0,
            has_more: true,
            is_loading_more: false,
            items: Vec::new(),
        }
    }

    /// Start over with a different feed, e.g. a new search query
    pub fn reset(&mut self, feed: MovieFeed) {
        *self = Self::new(feed);
    }

    pub fn feed(&self) -> &MovieFeed {
        &self.feed
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    /// The sentinel after the last item became visible
    ///
    /// Returns the page to fetch, or `None` when there is nothing more to
    /// load or a load is already running.
    pub fn on_sentinel_visible(&mut self) -> Option<u32> {
        if !self.has_more || self.is_loading_more {
            return None;
        }

        self.current_page += 1;
        self.is_loading_more = true;
        Some(self.current_page)
    }

    pub fn on_page_loaded(&mut self, page: MoviePage) {
        debug!(
            "Loaded page {}/{} of {} movies ({} results)",
            self.current_page,
            page.total_pages,
            self.feed,
            page.results.len()
        );

        self.items.extend(page.results);
        self.has_more = self.current_page < page.total_pages;
        self.is_loading_more = false;
    }

    /// A page fetch failed; `has_more` is left unchanged
    pub fn on_page_failed(&mut self, error: &ClientError) {
        warn!(
            "Failed to load page {} of {} movies: {}",
            self.current_page, self.feed, error
        );

        self.current_page = self.current_page.saturating_sub(1);
        self.is_loading_more = false;
    }

    /// Fetch the next page if allowed
    pub async fn load_next(&mut self, api: &dyn MovieApi) -> LoadOutcome {
        let Some(page) = self.on_sentinel_visible() else {
            return LoadOutcome::Skipped;
        };

        match api.fetch_page(&self.feed, page).await {
            Ok(page) => {
                let count = page.results.len();
                self.on_page_loaded(page);
                LoadOutcome::Appended(count)
            }
            Err(e) => {
                self.on_page_failed(&e);
                LoadOutcome::Failed
            }
        }
    }
}
