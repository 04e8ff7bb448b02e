//! Shared value types for the movie review application
//!
//! This crate holds the types exchanged between the backend service and
//! the client core: movies as returned by the upstream movie database,
//! reviews with their rating and tag vocabulary, and user/session payloads.
//! Wire-format quirks (comma-joined tags, nested video lists, response
//! envelopes) are confined to the [`wire`] module.

pub mod movie;
pub mod review;
pub mod tag;
pub mod user;
pub mod wire;

pub use movie::{Genre, Movie, MoviePage, Video};
pub use review::{NewReview, Rating, RatingError, Review};
pub use tag::{Tag, TagSet, UnknownTag};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};
