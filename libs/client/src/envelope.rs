//! Typed decoder for backend response envelopes
//!
//! The backend and older proxies disagree on how they wrap payloads. The
//! decoder accepts a closed set of shapes:
//!
//! - bare payload: `{"results": [...], ...}`, a bare array, or a bare object
//! - single wrap: `{"data": payload}` (optionally with `"success": true`)
//! - double wrap: `{"data": {"data": payload}}`
//!
//! Anything else is an explicit [`EnvelopeError`], never a silent empty list.

use models::{Movie, MoviePage};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Maximum number of `data` levels unwrapped
const MAX_DEPTH: usize = 2;

/// Decoding failure for a response envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// No layer carries the expected payload
    #[error("Unrecognized response shape")]
    UnrecognizedShape,

    /// A `results` key is present but is not an array
    #[error("`results` is not an array")]
    MalformedResults,

    /// The envelope reports `success: false`
    #[error("Server reported failure: {0}")]
    Rejected(String),

    /// The payload was located but does not deserialize
    #[error("Invalid payload: {0}")]
    Payload(String),
}

/// Walk the `data` chain, outermost first
fn layers(value: &Value) -> Result<Vec<&Value>, EnvelopeError> {
    let mut layers = Vec::with_capacity(MAX_DEPTH + 1);
    let mut current = value;

    loop {
        if let Some(Value::Bool(false)) = current.get("success") {
            let message = current
                .get("error")
                .or_else(|| current.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            return Err(EnvelopeError::Rejected(message.to_string()));
        }

        layers.push(current);
        if layers.len() > MAX_DEPTH {
            break;
        }

        match current.get("data") {
            Some(inner) => current = inner,
            None => break,
        }
    }

    Ok(layers)
}

fn payload<T: DeserializeOwned>(value: &Value) -> Result<T, EnvelopeError> {
    serde_json::from_value(value.clone()).map_err(|e| EnvelopeError::Payload(e.to_string()))
}

/// Decode a paginated movie listing
///
/// Prefers the innermost layer whose `results` is an array. A bare array
/// is accepted as a single page.
pub fn decode_movie_page(value: &Value) -> Result<MoviePage, EnvelopeError> {
    let layers = layers(value)?;
    let mut malformed = false;

    for (depth, layer) in layers.iter().enumerate().rev() {
        match layer {
            Value::Array(_) => {
                debug!("Decoded bare movie list at depth {}", depth);
                return payload::<Vec<Movie>>(layer).map(MoviePage::single);
            }
            Value::Object(object) => match object.get("results") {
                Some(Value::Array(_)) => {
                    debug!("Decoded movie page at depth {}", depth);
                    return payload(layer);
                }
                Some(_) => malformed = true,
                None => {}
            },
            _ => {}
        }
    }

    if malformed {
        Err(EnvelopeError::MalformedResults)
    } else {
        Err(EnvelopeError::UnrecognizedShape)
    }
}

/// Decode a movie detail object
///
/// Prefers the innermost layer carrying an `id`.
pub fn decode_movie(value: &Value) -> Result<Movie, EnvelopeError> {
    let layers = layers(value)?;

    layers
        .iter()
        .rev()
        .find(|layer| layer.get("id").is_some())
        .ok_or(EnvelopeError::UnrecognizedShape)
        .and_then(|layer| payload(layer))
}

/// Decode a list payload such as the reviews of a movie
pub fn decode_list<T: DeserializeOwned>(value: &Value) -> Result<Vec<T>, EnvelopeError> {
    let layers = layers(value)?;

    layers
        .iter()
        .rev()
        .find(|layer| layer.is_array())
        .ok_or(EnvelopeError::UnrecognizedShape)
        .and_then(|layer| payload(layer))
}

/// Decode a single object payload from the innermost layer
pub fn decode_item<T: DeserializeOwned>(value: &Value) -> Result<T, EnvelopeError> {
    let layers = layers(value)?;

    layers
        .last()
        .filter(|layer| layer.is_object())
        .ok_or(EnvelopeError::UnrecognizedShape)
        .and_then(|layer| payload(layer))
}
