use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    client::ApiClient,
    error::{ConsoleError, ConsoleResult},
};

/// Login endpoint, relative to the API base.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Message used when the backend refuses a login without explaining why.
pub const GENERIC_LOGIN_FAILURE: &str = "login failed";

/// LoginRequest
///
/// Body of `POST /api/auth/login`. The password is only forwarded, never logged or
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// AuthResponse
///
/// The authenticated identity returned by a successful login. It doubles as the
/// session profile persisted under the `profile` storage key, in the backend's
/// camelCase wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
}

/// Session profile: the identity the login response supplied.
pub type SessionProfile = AuthResponse;

/// AuthApi
///
/// The authentication collaborator. Implementations exchange username/password for a
/// fresh credential and profile, or fail with `ConsoleError::LoginFailed` carrying the
/// server's message.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ConsoleResult<AuthResponse>;
}

/// Shared handle to the authentication collaborator.
pub type AuthApiState = Arc<dyn AuthApi>;

/// HttpAuthApi
///
/// Talks to the backend's login endpoint through the request pipeline.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> ConsoleResult<AuthResponse> {
        // A rejected login is a failed attempt, not an expired session.
        let envelope = match self
            .client
            .call_unguarded::<AuthResponse, _>(Method::POST, LOGIN_PATH, |b| b.json(request))
            .await
        {
            Ok(envelope) => envelope,
            Err(ConsoleError::Unauthorized(status)) => {
                tracing::warn!(%status, username = %request.username, "login endpoint refused credentials");
                return Err(ConsoleError::LoginFailed(GENERIC_LOGIN_FAILURE.to_string()));
            }
            Err(e) => return Err(e),
        };

        if !envelope.is_ok() {
            let message = if envelope.message.trim().is_empty() {
                GENERIC_LOGIN_FAILURE.to_string()
            } else {
                envelope.message
            };
            return Err(ConsoleError::LoginFailed(message));
        }

        envelope.into_data()
    }
}
