//! Review data client and deletion flow

use async_trait::async_trait;
use models::{NewReview, Review};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    envelope::{decode_item, decode_list},
    error::{ClientError, ClientResult},
    http::ApiClient,
    session::{AuthToken, Session},
};

/// Transport for `/reviews/*`
///
/// Implementations only move data; validation and ownership checks belong
/// to the callers.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn list(&self, movie_id: i64) -> ClientResult<Vec<Review>>;
    async fn create(&self, payload: &NewReview, token: &AuthToken) -> ClientResult<Review>;
    async fn delete(&self, review_id: Uuid, token: &AuthToken) -> ClientResult<()>;
}

/// Client for `/reviews/*`
#[derive(Clone, Debug)]
pub struct ReviewClient {
    api: ApiClient,
}

impl ReviewClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReviewApi for ReviewClient {
    async fn list(&self, movie_id: i64) -> ClientResult<Vec<Review>> {
        let body = self
            .api
            .send(self.api.get(&format!("/reviews/{}", movie_id)))
            .await?;
        Ok(decode_list(&body)?)
    }

    async fn create(&self, payload: &NewReview, token: &AuthToken) -> ClientResult<Review> {
        let request = ApiClient::authorized(self.api.post("/reviews"), token).json(payload);
        let body = self.api.send(request).await?;
        Ok(decode_item(&body)?)
    }

    async fn delete(&self, review_id: Uuid, token: &AuthToken) -> ClientResult<()> {
        let request = ApiClient::authorized(self.api.delete(&format!("/reviews/{}", review_id)), token);
        self.api.send(request).await?;
        Ok(())
    }
}

/// Delete a review on behalf of the signed-in user
///
/// Anonymous callers and non-owners are rejected before any request is
/// made; the backend repeats the ownership check.
pub async fn delete_review(session: &Session, review: &Review, api: &dyn ReviewApi) -> ClientResult<()> {
    let (user, token) = session
        .credentials()
        .ok_or(ClientError::AuthenticationRequired)?;

    if !review.is_owned_by(user.id) {
        warn!(
            "User {} attempted to delete review {} owned by {}",
            user.id, review.id, review.user_id
        );
        return Err(ClientError::NotOwner);
    }

    api.delete(review.id, token).await?;
    info!("Deleted review {}", review.id);
    Ok(())
}
