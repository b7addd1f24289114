//! Bearer token authentication of the [`Rest`] backend.
//!
//! [`Rest`]: super::Rest

use std::fmt;

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Paths of the authentication endpoints.
#[derive(Clone, Debug)]
pub struct Paths {
    /// Path to obtain a new pair of tokens with [`Credentials`].
    pub login: String,

    /// Path to obtain a new access token with a refresh token.
    pub refresh: String,
}

/// Credentials of an admin to log in with.
pub struct Credentials {
    /// Username of the admin.
    pub username: String,

    /// Password of the admin.
    pub password: SecretString,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Pair of bearer tokens.
#[derive(Debug)]
pub struct Tokens {
    /// Short-living token authorizing requests.
    pub access: SecretString,

    /// Long-living token obtaining new [`access`] tokens, if any.
    ///
    /// [`access`]: Tokens::access
    pub refresh: Option<SecretString>,
}

/// Current [`Tokens`] shared by all the requests of a [`Rest`] backend.
///
/// [`Rest`]: super::Rest
#[derive(Debug, Default)]
pub(super) struct Session(RwLock<Option<Tokens>>);

impl Session {
    /// Replaces the current [`Tokens`].
    pub(super) async fn set(&self, tokens: Tokens) {
        *self.0.write().await = Some(tokens);
    }

    /// Replaces the current access token, keeping the refresh one.
    pub(super) async fn set_access(&self, access: SecretString) {
        let mut tokens = self.0.write().await;
        match tokens.as_mut() {
            Some(t) => t.access = access,
            None => {
                *tokens = Some(Tokens {
                    access,
                    refresh: None,
                });
            }
        }
    }

    /// Returns the `Authorization` header value, if authenticated.
    pub(super) async fn bearer(&self) -> Option<String> {
        self.0
            .read()
            .await
            .as_ref()
            .map(|t| format!("Bearer {}", t.access.expose_secret()))
    }

    /// Returns the current refresh token, if any.
    pub(super) async fn refresh_token(&self) -> Option<String> {
        self.0
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh.as_ref())
            .map(|r| r.expose_secret().to_owned())
    }
}

/// Attempt of a single logical request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attempt {
    /// Request is sent for the first time.
    First,

    /// Request is resent after refreshing the access token.
    Retry,
}

/// Next step of a logical request after receiving a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Next {
    /// Response is final, whatever its status is.
    Finish,

    /// Access token must be refreshed and the request retried.
    RefreshAndRetry,
}

/// Decides what to do with a response of the provided `status`.
///
/// A rejected request is retried exactly once, and only when a refresh token
/// is available to obtain a new access token with.
#[must_use]
pub fn next(status: u16, attempt: Attempt, can_refresh: bool) -> Next {
    match (status, attempt) {
        (401 | 403, Attempt::First) if can_refresh => Next::RefreshAndRetry,
        _ => Next::Finish,
    }
}

/// Body of a login request.
#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    /// Username of the admin.
    pub(super) username: &'a str,

    /// Password of the admin.
    pub(super) password: &'a str,
}

/// Body of a successful login response.
#[derive(Deserialize)]
pub(super) struct LoginResponse {
    /// New access token.
    pub(super) access: String,

    /// New refresh token.
    pub(super) refresh: String,
}

/// Body of a refresh request.
#[derive(Debug, Serialize)]
pub(super) struct RefreshRequest<'a> {
    /// Refresh token.
    pub(super) refresh: &'a str,
}

/// Body of a successful refresh response.
#[derive(Deserialize)]
pub(super) struct RefreshResponse {
    /// New access token.
    pub(super) access: String,
}

#[cfg(test)]
mod spec {
    use secrecy::SecretString;

    use super::{next, Attempt, Next, Session, Tokens};

    #[test]
    fn retries_rejected_request_once() {
        assert_eq!(next(401, Attempt::First, true), Next::RefreshAndRetry);
        assert_eq!(next(403, Attempt::First, true), Next::RefreshAndRetry);
        assert_eq!(next(401, Attempt::Retry, true), Next::Finish);
        assert_eq!(next(403, Attempt::Retry, true), Next::Finish);
    }

    #[test]
    fn never_retries_without_refresh_token() {
        assert_eq!(next(401, Attempt::First, false), Next::Finish);
    }

    #[test]
    fn finishes_on_other_statuses() {
        for status in [200, 201, 204, 400, 404, 500] {
            assert_eq!(next(status, Attempt::First, true), Next::Finish);
        }
    }

    #[tokio::test]
    async fn keeps_refresh_token_on_access_update() {
        let session = Session::default();
        assert_eq!(session.bearer().await, None);

        session
            .set(Tokens {
                access: SecretString::from("old"),
                refresh: Some(SecretString::from("r")),
            })
            .await;
        session.set_access(SecretString::from("new")).await;

        assert_eq!(session.bearer().await.as_deref(), Some("Bearer new"));
        assert_eq!(session.refresh_token().await.as_deref(), Some("r"));
    }
}
