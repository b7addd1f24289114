//! [`Config`]-related definitions.

use std::time;

use common::Money;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: Backend,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// REST backend configuration.
#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Base URL of the REST API.
    #[default("http://127.0.0.1:8000/api".to_owned())]
    pub base_url: String,

    /// Timeout of a single HTTP request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Authentication configuration.
    pub auth: Auth,
}

impl From<&Backend> for service::infra::rest::Config {
    fn from(value: &Backend) -> Self {
        let Backend {
            base_url,
            timeout,
            auth,
        } = value;

        Self {
            base_url: base_url.clone(),
            timeout: *timeout,
            auth: service::infra::rest::auth::Paths {
                login: auth.login_path.clone(),
                refresh: auth.refresh_path.clone(),
            },
        }
    }
}

/// Authentication configuration.
///
/// Either the already issued tokens or the credentials to log in with
/// should be provided. Tokens take precedence.
#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Auth {
    /// Path to obtain a new pair of tokens with the credentials.
    #[default("auth/token/".to_owned())]
    pub login_path: String,

    /// Path to obtain a new access token with a refresh token.
    #[default("auth/token/refresh/".to_owned())]
    pub refresh_path: String,

    /// Username of the admin to log in as.
    pub username: Option<String>,

    /// Password of the admin to log in with.
    pub password: Option<SecretString>,

    /// Already issued access token.
    pub access_token: Option<SecretString>,

    /// Already issued refresh token.
    pub refresh_token: Option<SecretString>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Maximum difference between the preview and the backend totals of a
    /// quote which isn't reported.
    #[default(Money::ZERO)]
    pub divergence_tolerance: Money,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            divergence_tolerance,
        } = value;
        Self {
            divergence_tolerance,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::ExposeSecret as _;

    use super::{Config, LogLevel};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely-missing-config").unwrap();

        assert_eq!(conf.backend.timeout, Duration::from_secs(30));
        assert_eq!(conf.backend.auth.login_path, "auth/token/");
        assert!(conf.backend.auth.access_token.is_none());
        assert!(matches!(conf.log.level, LogLevel::Warn));
    }

    #[test]
    fn deserializes_secrets_and_durations() {
        let conf: Config = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [backend]
                timeout = "5s"

                [backend.auth]
                username = "admin"
                password = "hunter2"

                [service]
                divergence_tolerance = "0.50"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(conf.backend.timeout, Duration::from_secs(5));
        assert_eq!(
            conf.backend.auth.password.as_ref().map(|p| p.expose_secret()),
            Some("hunter2"),
        );
        assert_eq!(
            conf.service.divergence_tolerance.to_string(),
            "$0.50",
        );
    }
}
