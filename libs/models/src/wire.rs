//! Wire-format adapters
//!
//! The REST boundary carries a few shapes that do not map one-to-one onto
//! the domain types: tags travel as a single comma-joined string, movie
//! videos may arrive nested under `results`, and every backend response is
//! wrapped in a `{success, data}` envelope. Those conversions live here and
//! nowhere else.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::{movie::Video, tag::TagSet};

/// Join tags into their comma-separated wire form
pub fn join_tags(tags: &TagSet) -> String {
    tags.labels().join(",")
}

/// Split a comma-separated tag string
///
/// Entries are trimmed and empty entries skipped. Labels outside the
/// vocabulary are dropped with a warning rather than failing the whole
/// payload.
pub fn split_tags(joined: &str) -> TagSet {
    parse_labels(joined.split(','))
}

fn parse_labels<'a>(labels: impl Iterator<Item = &'a str>) -> TagSet {
    labels
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter_map(|label| match label.parse() {
            Ok(tag) => Some(tag),
            Err(e) => {
                warn!("Skipping tag outside the vocabulary: {}", e);
                None
            }
        })
        .collect()
}

/// Serde adapter for tag sets carried as a comma-joined string
///
/// Deserialization also accepts an array of labels or `null`.
pub mod comma_tags {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(tags: &TagSet, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&join_tags(tags))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TagSet, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => TagSet::default(),
            Some(Raw::Joined(joined)) => split_tags(&joined),
            Some(Raw::List(labels)) => parse_labels(labels.iter().map(String::as_str)),
        })
    }
}

/// Deserialize a video list that is either a bare array or nested as
/// `{"results": [...]}`
pub fn video_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Video>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Video>),
        Nested {
            #[serde(default)]
            results: Vec<Video>,
        },
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::List(videos)) => videos,
        Some(Raw::Nested { results }) => results,
    })
}

/// Success envelope wrapping every backend response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
}

impl ApiFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
