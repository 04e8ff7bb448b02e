//! Request payloads accepted by the HTTP handlers

use serde::{Deserialize, Deserializer};

/// `?page=` query of the movie list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// `?query=&page=` query of the movie search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}

/// Body of `POST /api/reviews`
///
/// Kept loosely typed so that range and vocabulary errors surface as 400
/// responses with a readable message instead of a generic rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub movie_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default, deserialize_with = "raw_tags")]
    pub tags: Vec<String>,
}

/// Tags arrive comma-joined from the web client; arrays are accepted too
fn raw_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Joined(String),
        List(Vec<String>),
    }

    let labels = match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
        Some(Raw::List(list)) => list,
    };

    Ok(labels
        .into_iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect())
}
