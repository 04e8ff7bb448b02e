//! Movie models as served by the upstream movie database

use serde::{Deserialize, Serialize};

use crate::wire;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Movie genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Video attached to a movie (trailers, teasers, clips)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Provider-specific video identifier, e.g. the YouTube video id
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Video {
    /// Whether this video is an official YouTube trailer
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }
}

/// Movie entity
///
/// List endpoints return a subset of the fields, so everything except the
/// identifier is optional or defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Runtime in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "wire::video_list")]
    pub videos: Vec<Video>,
}

impl Movie {
    /// First official YouTube trailer, if any
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.is_youtube_trailer())
    }

    /// Poster image URL at `w500`
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}/w500{}", IMAGE_BASE_URL, path))
    }

    /// Backdrop image URL at original size
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| format!("{}/original{}", IMAGE_BASE_URL, path))
    }
}

fn first_page() -> u32 {
    1
}

/// One page of a paginated movie listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<Movie>,
    /// Total number of pages; defaults to 1 when the upstream omits it
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl MoviePage {
    /// Build a single page from a bare list of movies
    pub fn single(results: Vec<Movie>) -> Self {
        let total_results = results.len() as u64;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }
}
