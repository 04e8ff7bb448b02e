//! Review submission flow
//!
//! ```text
//! Idle -> Validating -> Submitting -> Idle
//!            |                          ^
//!            +--------- rejected -------+
//! ```
//!
//! The last completed attempt is kept in [`ReviewComposer::last_outcome`]
//! so a renderer can show a success or error message.

use models::{NewReview, Rating, Review, Tag, TagSet};
use thiserror::Error;
use tracing::{error, info};

use crate::{error::ClientError, reviews::ReviewApi, session::Session};

/// Why a submission did not go through
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Log in to write a review")]
    AuthenticationRequired,

    #[error("A review is already being submitted")]
    InFlight,

    #[error("Invalid review: {0}")]
    Invalid(String),

    #[error("Failed to submit review: {0}")]
    Request(#[source] ClientError),

    /// The review was created but the list could not be reloaded
    #[error("Review saved but reloading reviews failed: {0}")]
    Refresh(#[source] ClientError),
}

/// Submission state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of the last completed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed(String),
}

/// Review form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    /// Selected star count; validated on submit
    pub rating: u8,
    pub comment: String,
    pub spoiler: bool,
    pub tags: TagSet,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            rating: Rating::MAX,
            comment: String::new(),
            spoiler: false,
            tags: TagSet::new(),
        }
    }
}

impl ReviewForm {
    /// Validate the form into a creation payload
    pub fn to_payload(&self, movie_id: i64) -> Result<NewReview, SubmitError> {
        let rating = Rating::new(self.rating).map_err(|e| SubmitError::Invalid(e.to_string()))?;

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(SubmitError::Invalid("Comment must not be empty".to_string()));
        }

        Ok(NewReview {
            movie_id,
            rating,
            comment: comment.to_string(),
            spoiler: self.spoiler,
            tags: self.tags.clone(),
        })
    }
}

/// Review composer for one movie
#[derive(Debug, Clone)]
pub struct ReviewComposer {
    movie_id: i64,
    pub form: ReviewForm,
    state: SubmissionState,
    last_outcome: Option<SubmitOutcome>,
}

impl ReviewComposer {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            form: ReviewForm::default(),
            state: SubmissionState::Idle,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Whether the submit control should be disabled
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn set_rating(&mut self, stars: u8) {
        self.form.rating = stars;
    }

    /// Tags only apply to spoiler reviews, so clearing the flag drops them
    pub fn set_spoiler(&mut self, spoiler: bool) {
        self.form.spoiler = spoiler;
        if !spoiler {
            self.form.tags.clear();
        }
    }

    pub fn toggle_tag(&mut self, tag: Tag) {
        self.form.tags.toggle(tag);
    }

    /// Validate and move to `Submitting`
    ///
    /// Rejections return the composer to `Idle` without touching the
    /// network. A second call while a request is in flight is refused.
    pub fn prepare(&mut self, session: &Session) -> Result<NewReview, SubmitError> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmitError::InFlight);
        }
        self.state = SubmissionState::Validating;

        if !session.is_authenticated() {
            self.state = SubmissionState::Idle;
            return Err(SubmitError::AuthenticationRequired);
        }

        match self.form.to_payload(self.movie_id) {
            Ok(payload) => {
                self.state = SubmissionState::Submitting;
                Ok(payload)
            }
            Err(e) => {
                self.state = SubmissionState::Idle;
                Err(e)
            }
        }
    }

    /// Submit the form and reload the review list
    ///
    /// On success the form resets to its defaults and the freshly fetched
    /// reviews are returned. On failure the form is kept as typed.
    pub async fn submit(&mut self, session: &Session, api: &dyn ReviewApi) -> Result<Vec<Review>, SubmitError> {
        let payload = self.prepare(session)?;
        let Some(token) = session.token() else {
            self.state = SubmissionState::Idle;
            return Err(SubmitError::AuthenticationRequired);
        };

        let created = api.create(&payload, token).await;
        self.state = SubmissionState::Idle;

        match created {
            Ok(review) => {
                info!("Submitted review {} for movie {}", review.id, self.movie_id);
                self.form = ReviewForm::default();
                self.last_outcome = Some(SubmitOutcome::Succeeded);
                api.list(self.movie_id).await.map_err(SubmitError::Refresh)
            }
            Err(e) => {
                error!("Failed to submit review for movie {}: {}", self.movie_id, e);
                self.last_outcome = Some(SubmitOutcome::Failed(e.to_string()));
                Err(SubmitError::Request(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reviews::tests::FakeReviews, session::AuthToken};
    use models::User;
    use uuid::Uuid;

    fn signed_in() -> Session {
        Session::signed_in(
            User {
                id: Uuid::new_v4(),
                username: "jiwoo".to_string(),
            },
            AuthToken::new("token"),
        )
    }

    fn filled(composer: &mut ReviewComposer) {
        composer.set_rating(4);
        composer.form.comment = "good".to_string();
        composer.set_spoiler(true);
        composer.toggle_tag(Tag::Ending);
        composer.toggle_tag(Tag::Ost);
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_makes_no_request() {
        let api = FakeReviews::default();
        let mut composer = ReviewComposer::new(42);
        filled(&mut composer);

        let result = composer.submit(&Session::anonymous(), &api).await;

        assert!(matches!(result, Err(SubmitError::AuthenticationRequired)));
        assert_eq!(api.call_count(), 0);
        assert_eq!(composer.state(), SubmissionState::Idle);
        assert_eq!(composer.form.comment, "good");
    }

    #[tokio::test]
    async fn test_successful_submit_posts_joined_tags_and_resets_form() {
        let api = FakeReviews::default();
        let mut composer = ReviewComposer::new(42);
        filled(&mut composer);

        let reviews = composer.submit(&signed_in(), &api).await.unwrap();

        let created = api.created.lock().unwrap().clone();
        assert_eq!(created.len(), 1);
        assert_eq!(
            serde_json::to_value(&created[0]).unwrap(),
            serde_json::json!({
                "movie_id": 42,
                "rating": 4,
                "comment": "good",
                "spoiler": true,
                "tags": "결말,OST"
            })
        );

        assert_eq!(composer.form, ReviewForm::default());
        assert_eq!(composer.form.rating, 5);
        assert!(composer.form.tags.is_empty());
        assert_eq!(composer.last_outcome(), Some(&SubmitOutcome::Succeeded));
        assert_eq!(reviews.len(), 1);
        // create + refetch
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form() {
        let api = FakeReviews {
            fail_create: true,
            ..Default::default()
        };
        let mut composer = ReviewComposer::new(42);
        filled(&mut composer);
        let before = composer.form.clone();

        let result = composer.submit(&signed_in(), &api).await;

        assert!(matches!(result, Err(SubmitError::Request(_))));
        assert_eq!(composer.form, before);
        assert_eq!(composer.state(), SubmissionState::Idle);
        assert!(matches!(composer.last_outcome(), Some(SubmitOutcome::Failed(_))));
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let api = FakeReviews::default();
        let mut composer = ReviewComposer::new(42);
        composer.form.comment = "   ".to_string();
        assert!(matches!(
            composer.submit(&signed_in(), &api).await,
            Err(SubmitError::Invalid(_))
        ));

        composer.form.comment = "great".to_string();
        composer.set_rating(0);
        assert!(matches!(
            composer.submit(&signed_in(), &api).await,
            Err(SubmitError::Invalid(_))
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut composer = ReviewComposer::new(1);
        composer.form.comment = "twice".to_string();
        let session = signed_in();

        assert!(composer.prepare(&session).is_ok());
        assert!(composer.is_submitting());
        assert!(matches!(composer.prepare(&session), Err(SubmitError::InFlight)));
    }

    #[test]
    fn test_clearing_spoiler_drops_tags() {
        let mut composer = ReviewComposer::new(1);
        composer.set_spoiler(true);
        composer.toggle_tag(Tag::Death);
        composer.set_spoiler(false);
        assert!(composer.form.tags.is_empty());
    }
}
