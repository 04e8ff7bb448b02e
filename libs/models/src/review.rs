//! Review model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{tag::TagSet, wire};

/// Rating outside the accepted star range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Rating must be between 1 and 5, got {value}")]
pub struct RatingError {
    pub value: i64,
}

/// Star rating, always within `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RatingError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingError { value })
        }
    }
}

impl TryFrom<i16> for Rating {
    type Error = RatingError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Review entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub username: String,
    pub movie_id: i64,
    pub rating: Rating,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default, with = "wire::comma_tags")]
    pub tags: TagSet,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether the given user wrote this review
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// New review creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub movie_id: i64,
    pub rating: Rating,
    pub comment: String,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default, with = "wire::comma_tags")]
    pub tags: TagSet,
}
