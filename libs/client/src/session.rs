//! Authentication session
//!
//! The session is an explicit value handed to the flows that need to know
//! who is signed in. It is created by [`Session::restore`] when the app
//! loads, replaced on [`Session::login`], and cleared by [`Session::logout`].

use std::fmt;

use models::{LoginRequest, User};
use tracing::{info, warn};

use crate::{error::ClientResult, users::UserApi};

/// Bearer token issued by the backend
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone)]
struct SignedIn {
    user: User,
    token: AuthToken,
}

/// Current authentication state
#[derive(Debug, Clone, Default)]
pub struct Session {
    signed_in: Option<SignedIn>,
}

impl Session {
    /// Session with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for an already-authenticated user
    pub fn signed_in(user: User, token: AuthToken) -> Self {
        Self {
            signed_in: Some(SignedIn { user, token }),
        }
    }

    /// Restore a session from a previously stored token
    ///
    /// The token is checked against the profile endpoint; any failure
    /// leaves the session anonymous.
    pub async fn restore(api: &dyn UserApi, stored: Option<AuthToken>) -> Self {
        let Some(token) = stored else {
            return Self::anonymous();
        };

        match api.profile(&token).await {
            Ok(user) => {
                info!("Restored session for user: {}", user.username);
                Self::signed_in(user, token)
            }
            Err(e) => {
                warn!("Failed to restore session: {}", e);
                Self::anonymous()
            }
        }
    }

    /// Log in and replace the current session
    pub async fn login(&mut self, api: &dyn UserApi, request: &LoginRequest) -> ClientResult<&User> {
        let response = api.login(request).await?;
        info!("Logged in as {}", response.user.username);

        let signed_in = self.signed_in.insert(SignedIn {
            user: response.user,
            token: AuthToken::new(response.token),
        });
        Ok(&signed_in.user)
    }

    /// Clear the session
    pub fn logout(&mut self) {
        if let Some(signed_in) = self.signed_in.take() {
            info!("Logged out {}", signed_in.user.username);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.signed_in.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.signed_in.as_ref().map(|s| &s.token)
    }

    /// User and token together, when signed in
    pub fn credentials(&self) -> Option<(&User, &AuthToken)> {
        self.signed_in.as_ref().map(|s| (&s.user, &s.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use models::{LoginResponse, RegisterRequest};
    use uuid::Uuid;

    struct FakeUsers {
        user: User,
        valid_token: &'static str,
    }

    #[async_trait]
    impl UserApi for FakeUsers {
        async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
            if request.password != "secret" {
                return Err(ClientError::Status {
                    status: 401,
                    message: "Invalid credentials".to_string(),
                });
            }
            Ok(LoginResponse {
                token: self.valid_token.to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
                user: self.user.clone(),
            })
        }

        async fn register(&self, _request: &RegisterRequest) -> ClientResult<User> {
            Ok(self.user.clone())
        }

        async fn profile(&self, token: &AuthToken) -> ClientResult<User> {
            if token.as_str() == self.valid_token {
                Ok(self.user.clone())
            } else {
                Err(ClientError::Status {
                    status: 401,
                    message: "Unauthorized".to_string(),
                })
            }
        }
    }

    fn fake() -> FakeUsers {
        FakeUsers {
            user: User {
                id: Uuid::new_v4(),
                username: "minji".to_string(),
            },
            valid_token: "token-1",
        }
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let api = fake();
        let session = Session::restore(&api, Some(AuthToken::new("token-1"))).await;
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("minji"));
    }

    #[tokio::test]
    async fn test_restore_with_stale_or_missing_token() {
        let api = fake();
        assert!(!Session::restore(&api, Some(AuthToken::new("old"))).await.is_authenticated());
        assert!(!Session::restore(&api, None).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let api = fake();
        let mut session = Session::anonymous();

        let failed = session
            .login(
                &api,
                &LoginRequest {
                    username: "minji".to_string(),
                    password: "wrong".to_string(),
                },
            )
            .await;
        assert!(failed.is_err());
        assert!(!session.is_authenticated());

        session
            .login(
                &api,
                &LoginRequest {
                    username: "minji".to_string(),
                    password: "secret".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(session.token().map(AuthToken::as_str), Some("token-1"));

        session.logout();
        assert!(session.credentials().is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        assert_eq!(format!("{:?}", AuthToken::new("abc")), "AuthToken(***)");
    }
}
