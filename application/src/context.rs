//! [`Context`]-related definitions.

use service::infra::{
    rest::{Credentials, Tokens},
    Rest,
};
use tracing as log;

use crate::{config, define_error, AsError, Error, Service};

/// Console context shared by all the console commands.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,
}

impl Context {
    /// Creates a new authenticated [`Context`] out of the provided
    /// configurations.
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the REST client cannot be built;
    /// - neither tokens nor credentials are configured;
    /// - the backend rejects the configured credentials.
    pub async fn new(
        backend: config::Backend,
        service: config::Service,
    ) -> Result<Self, Error> {
        let rest = Rest::new(&(&backend).into()).map_err(AsError::into_error)?;

        let config::Auth {
            username,
            password,
            access_token,
            refresh_token,
            ..
        } = backend.auth;
        match (access_token, username, password) {
            (Some(access), ..) => {
                log::debug!("using configured tokens");
                rest.authorize(Tokens {
                    access,
                    refresh: refresh_token,
                })
                .await;
            }
            (None, Some(username), Some(password)) => {
                rest.login(&Credentials { username, password })
                    .await
                    .map_err(|e| {
                        if e.as_ref().is_unauthorized() {
                            AuthError::WrongCredentials.into()
                        } else {
                            e.into_error()
                        }
                    })?;
            }
            (None, ..) => return Err(AuthError::NoCredentials.into()),
        }

        Ok(Self {
            service: Service::new(service.into(), rest),
        })
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }
}

define_error! {
    enum AuthError {
        #[code = "NO_CREDENTIALS"]
        #[message = "Either `backend.auth.access_token` or \
                     `backend.auth.username` with `backend.auth.password` \
                     must be configured"]
        NoCredentials,

        #[code = "WRONG_CREDENTIALS"]
        #[message = "Provided credentials do not match any admin"]
        WrongCredentials,
    }
}
