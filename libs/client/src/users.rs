//! User data client

use async_trait::async_trait;
use models::{LoginRequest, LoginResponse, RegisterRequest, User};

use crate::{
    envelope::decode_item,
    error::ClientResult,
    http::ApiClient,
    session::AuthToken,
};

/// Account operations used by the session
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;
    async fn register(&self, request: &RegisterRequest) -> ClientResult<User>;
    async fn profile(&self, token: &AuthToken) -> ClientResult<User>;
}

/// Client for `/users/*`
#[derive(Clone, Debug)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserApi for UserClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let body = self
            .api
            .send(self.api.post("/users/login").json(request))
            .await?;
        Ok(decode_item(&body)?)
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let body = self
            .api
            .send(self.api.post("/users/register").json(request))
            .await?;
        Ok(decode_item(&body)?)
    }

    async fn profile(&self, token: &AuthToken) -> ClientResult<User> {
        let request = ApiClient::authorized(self.api.get("/users/profile"), token);
        let body = self.api.send(request).await?;
        Ok(decode_item(&body)?)
    }
}
