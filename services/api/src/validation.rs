//! Input validation utilities

use models::{NewReview, Rating, Tag, TagSet};
use regex::Regex;
use std::sync::OnceLock;

use crate::payloads::CreateReviewRequest;

/// Longest accepted review comment, in characters
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let length = username.chars().count();
    if length < 2 {
        return Err("Username must be at least 2 characters long".to_string());
    }

    if length > 20 {
        return Err("Username must be at most 20 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| Regex::new(r"^[\w가-힣]+$").ok());

    if !regex.as_ref().is_some_and(|r| r.is_match(username)) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

    if !regex.as_ref().is_some_and(|r| r.is_match(email)) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("Password must contain at least one letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

/// Validate a review submission and turn it into a typed review
pub fn validate_review(request: &CreateReviewRequest) -> Result<NewReview, String> {
    if request.movie_id <= 0 {
        return Err("movie_id must be a positive integer".to_string());
    }

    let rating = Rating::try_from(request.rating).map_err(|e| e.to_string())?;

    let comment = request.comment.trim();
    if comment.is_empty() {
        return Err("Comment is required".to_string());
    }

    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(format!(
            "Comment must be at most {} characters long",
            MAX_COMMENT_CHARS
        ));
    }

    let tags = request
        .tags
        .iter()
        .map(|label| label.parse::<Tag>().map_err(|e| e.to_string()))
        .collect::<Result<TagSet, String>>()?;

    Ok(NewReview {
        movie_id: request.movie_id,
        rating,
        comment: comment.to_string(),
        spoiler: request.spoiler,
        tags,
    })
}
