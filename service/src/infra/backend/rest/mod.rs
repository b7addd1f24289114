//! REST [`Backend`] implementation.

pub mod auth;
mod dto;
mod impls;

use std::{sync::Arc, time::Duration};

use common::FieldErrors;
use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::infra::backend;
#[cfg(doc)]
use crate::infra::Backend;

pub use self::auth::{Attempt, Credentials, Tokens};

/// [`Rest`] backend configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, e.g. `https://example.com/api`.
    pub base_url: String,

    /// Timeout of a single HTTP request.
    pub timeout: Duration,

    /// Paths of the authentication endpoints.
    pub auth: auth::Paths,
}

/// REST [`Backend`] client.
#[derive(Clone, Debug)]
pub struct Rest {
    /// HTTP client performing the requests.
    client: reqwest::Client,

    /// Base URL of the REST API, without a trailing slash.
    base_url: Arc<str>,

    /// Paths of the authentication endpoints.
    paths: Arc<auth::Paths>,

    /// Current authentication [`Tokens`].
    session: Arc<auth::Session>,
}

impl Rest {
    /// Creates a new unauthenticated [`Rest`] client with the provided
    /// [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<backend::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').into(),
            paths: Arc::new(conf.auth.clone()),
            session: Arc::default(),
        })
    }

    /// Authenticates this [`Rest`] client with the already issued [`Tokens`].
    pub async fn authorize(&self, tokens: Tokens) {
        self.session.set(tokens).await;
    }

    /// Logs in with the provided [`Credentials`], authenticating this
    /// [`Rest`] client.
    ///
    /// # Errors
    ///
    /// If the backend rejects the [`Credentials`] or is unreachable.
    #[tracing::instrument(skip_all, fields(username = %creds.username))]
    pub async fn login(
        &self,
        creds: &Credentials,
    ) -> Result<(), Traced<backend::Error>> {
        let body = auth::LoginRequest {
            username: &creds.username,
            password: creds.password.expose_secret(),
        };
        let resp = self
            .client
            .post(self.url(&self.paths.login))
            .json(&body)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let tokens: auth::LoginResponse = Self::decode(resp)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        self.session
            .set(Tokens {
                access: SecretString::from(tokens.access),
                refresh: Some(SecretString::from(tokens.refresh)),
            })
            .await;
        log::info!("logged in");
        Ok(())
    }

    /// Obtains a new access token with the current refresh token.
    async fn refresh(&self, refresh: &str) -> Result<(), Traced<Error>> {
        log::debug!("refreshing access token");

        let resp = self
            .client
            .post(self.url(&self.paths.refresh))
            .json(&auth::RefreshRequest { refresh })
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let tokens: auth::RefreshResponse =
            Self::decode(resp).await.map_err(tracerr::wrap!())?;

        self.session
            .set_access(SecretString::from(tokens.access))
            .await;
        Ok(())
    }

    /// Builds an absolute URL of the provided API `path`.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a single logical request, refreshing the access token and
    /// retrying once if the backend rejects the current one.
    async fn send<B>(
        &self,
        req: Request<'_, B>,
    ) -> Result<reqwest::Response, Traced<Error>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(req.path);
        let mut attempt = Attempt::First;
        loop {
            let mut builder = self.client.request(req.method.clone(), &url);
            if let Some(bearer) = self.session.bearer().await {
                builder = builder.header(reqwest::header::AUTHORIZATION, bearer);
            }
            if !req.query.is_empty() {
                builder = builder.query(req.query);
            }
            if let Some(body) = req.body {
                builder = builder.json(body);
            }

            log::debug!(method = %req.method, %url, ?attempt, "sending request");
            let resp = builder
                .send()
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;

            let refresh = self.session.refresh_token().await;
            match auth::next(resp.status().as_u16(), attempt, refresh.is_some())
            {
                auth::Next::Finish => return Ok(resp),
                auth::Next::RefreshAndRetry => {
                    log::info!(
                        status = %resp.status(),
                        "access token rejected, refreshing",
                    );
                    if let Some(refresh) = refresh {
                        self.refresh(&refresh)
                            .await
                            .map_err(tracerr::wrap!())?;
                    }
                    attempt = Attempt::Retry;
                }
            }
        }
    }

    /// Performs the request, decoding the response body as `T`.
    async fn fetch<T, B>(&self, req: Request<'_, B>) -> Result<T, Traced<Error>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.send(req).await.map_err(tracerr::wrap!())?;
        Self::decode(resp).await.map_err(tracerr::wrap!())
    }

    /// Performs the request, decoding the response body as `T`, or returning
    /// [`None`] if the backend has no such entity.
    async fn fetch_optional<T, B>(
        &self,
        req: Request<'_, B>,
    ) -> Result<Option<T>, Traced<Error>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.send(req).await.map_err(tracerr::wrap!())?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(resp).await.map(Some).map_err(tracerr::wrap!())
    }

    /// Performs the request, ignoring the response body.
    async fn perform<B>(&self, req: Request<'_, B>) -> Result<(), Traced<Error>>
    where
        B: Serialize + ?Sized,
    {
        let resp = self.send(req).await.map_err(tracerr::wrap!())?;
        Self::check(resp).await.map(drop).map_err(tracerr::wrap!())
    }

    /// Checks the [`reqwest::Response`] is successful, returning its body.
    async fn check(resp: reqwest::Response) -> Result<String, Traced<Error>> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        if status.is_success() {
            return Ok(body);
        }

        log::warn!(%status, body = %preview(&body), "request failed");
        Err(tracerr::new!(Error::Status {
            status,
            errors: dto::field_errors(&body),
        }))
    }

    /// Decodes the body of a successful [`reqwest::Response`] as `T`.
    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Traced<Error>> {
        let body = Self::check(resp).await.map_err(tracerr::wrap!())?;
        log::trace!(body = %preview(&body), "response received");
        serde_json::from_str(&body).map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// Single logical request to the REST API.
#[derive(Debug)]
struct Request<'a, B: ?Sized = ()> {
    /// HTTP method of this [`Request`].
    method: Method,

    /// API path of this [`Request`].
    path: &'a str,

    /// Query parameters of this [`Request`].
    query: &'a [(&'a str, &'a str)],

    /// JSON body of this [`Request`], if any.
    body: Option<&'a B>,
}

impl<'a> Request<'a> {
    /// Creates a new `GET` [`Request`] to the provided `path`.
    fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: &[],
            body: None,
        }
    }
}

impl<'a, B: ?Sized> Request<'a, B> {
    /// Creates a new [`Request`] with the provided JSON `body`.
    fn with_body(method: Method, path: &'a str, body: &'a B) -> Self {
        Self {
            method,
            path,
            query: &[],
            body: Some(body),
        }
    }

    /// Sets the query parameters of this [`Request`].
    fn query(mut self, query: &'a [(&'a str, &'a str)]) -> Self {
        self.query = query;
        self
    }
}

/// Returns a preview of the provided response `body` to be logged.
fn preview(body: &str) -> String {
    const MAX: usize = 500;

    if body.chars().count() <= MAX {
        return body.to_owned();
    }
    let mut preview = body.chars().take(MAX).collect::<String>();
    preview.push_str("...");
    preview
}

/// [`Rest`] backend error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed to be performed.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Backend responded with an unsuccessful status.
    #[display("backend responded with `{status}`: {errors}")]
    #[from(ignore)]
    Status {
        /// HTTP status of the response.
        status: StatusCode,

        /// Field-level errors reported by the backend.
        errors: FieldErrors,
    },

    /// Response body is malformed.
    #[display("malformed response: {_0}")]
    Decode(serde_json::Error),

    /// Response contains an entity this client cannot represent.
    #[display("malformed {_0} in response")]
    #[from(ignore)]
    MalformedEntity(#[error(not(source))] &'static str),
}

impl Error {
    /// Returns the HTTP status the backend responded with, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(status.as_u16()),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::MalformedEntity(_) => None,
        }
    }

    /// Returns the field-level validation errors of a rejected request, if
    /// any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Status { status, errors }
                if *status == StatusCode::BAD_REQUEST && !errors.is_empty() =>
            {
                Some(errors)
            }
            Self::Status { .. }
            | Self::Request(_)
            | Self::Decode(_)
            | Self::MalformedEntity(_) => None,
        }
    }
}
