//! Review list filtering and sorting
//!
//! [`derive_view`] is pure: given the same reviews and selections it always
//! returns the same ordering, and it never touches the network.

use std::fmt;
use std::str::FromStr;

use models::{Review, Tag};
use thiserror::Error;

/// Selection value that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseSelectionError {
    pub kind: &'static str,
    pub value: String,
}

/// Which reviews to show by spoiler flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Spoiler,
    Normal,
}

impl ReviewFilter {
    pub fn matches(self, review: &Review) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Spoiler => review.spoiler,
            ReviewFilter::Normal => !review.spoiler,
        }
    }
}

impl FromStr for ReviewFilter {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ReviewFilter::All),
            "spoiler" => Ok(ReviewFilter::Spoiler),
            "normal" => Ok(ReviewFilter::Normal),
            other => Err(ParseSelectionError {
                kind: "filter",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewFilter::All => "all",
            ReviewFilter::Spoiler => "spoiler",
            ReviewFilter::Normal => "normal",
        })
    }
}

/// Review ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Highest rating first
    High,
    /// Lowest rating first
    Low,
}

impl FromStr for ReviewSort {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(ReviewSort::Latest),
            "oldest" => Ok(ReviewSort::Oldest),
            "high" => Ok(ReviewSort::High),
            "low" => Ok(ReviewSort::Low),
            other => Err(ParseSelectionError {
                kind: "sort",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReviewSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewSort::Latest => "latest",
            ReviewSort::Oldest => "oldest",
            ReviewSort::High => "high",
            ReviewSort::Low => "low",
        })
    }
}

/// Filter kind, filter tag and sort, applied in that order
///
/// Ties in the sort key keep their input order.
pub fn derive_view(
    reviews: &[Review],
    filter: ReviewFilter,
    selected_tag: Option<Tag>,
    sort: ReviewSort,
) -> Vec<Review> {
    let mut view: Vec<Review> = reviews
        .iter()
        .filter(|review| filter.matches(review))
        .filter(|review| selected_tag.is_none_or(|tag| review.tags.contains(tag)))
        .cloned()
        .collect();

    match sort {
        ReviewSort::Latest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ReviewSort::Oldest => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ReviewSort::High => view.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::Low => view.sort_by(|a, b| a.rating.cmp(&b.rating)),
    }

    view
}

/// The current filter/sort selection of a review list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub filter: ReviewFilter,
    pub tag: Option<Tag>,
    pub sort: ReviewSort,
}

impl ReviewQuery {
    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        derive_view(reviews, self.filter, self.tag, self.sort)
    }

    /// Select a tag, or clear the selection when the same tag is picked again
    pub fn toggle_tag(&mut self, tag: Tag) {
        self.tag = if self.tag == Some(tag) { None } else { Some(tag) };
    }
}
