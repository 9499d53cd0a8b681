//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::read::{contract::Proration, salary::BonusSharing};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Loads the [`Config`] from the optional file at the provided `path`,
    /// overridden by `CONF.`-prefixed environment variables.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// If any of the sources holds a malformed value.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,

    /// Maximum duration of a single request, after which it's aborted along
    /// with all its in-flight computations.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub request_timeout: time::Duration,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [`Proration`] of rent charges of contracts covering a month partially.
    pub proration: Proration,

    /// [`BonusSharing`] of the building service revenue among employees.
    pub bonus_sharing: BonusSharing,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            proration,
            bonus_sharing,
        } = value;
        Self {
            proration,
            bonus_sharing,
        }
    }
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host of the database server.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port of the database server.
    #[default(5432)]
    pub port: u16,

    /// Role owning the building finance tables.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password of the [`Postgres::user`].
    #[default("postgres".to_owned())]
    pub password: String,

    /// Name of the database holding the building finance tables.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        Self {
            host: Some(value.host),
            port: Some(value.port),
            user: Some(value.user),
            password: Some(value.password),
            dbname: Some(value.dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Log {
    /// Maximum [`tracing::Level`] of the emitted events.
    ///
    /// Accepts any case of `TRACE`, `DEBUG`, `INFO`, `WARN` or `ERROR`.
    #[default(tracing::Level::INFO)]
    #[serde(deserialize_with = "level")]
    pub level: tracing::Level,
}

/// Deserializes a [`tracing::Level`] out of its name.
fn level<'de, D>(de: D) -> Result<tracing::Level, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(de)?;
    name.parse()
        .map_err(|_| serde::de::Error::unknown_variant(&name, LEVELS))
}

/// Names of the supported [`tracing::Level`]s.
const LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

#[cfg(test)]
mod spec {
    use super::Config;

    #[test]
    fn defaults_without_sources() {
        let conf = Config::new("nonexistent.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.server.request_timeout.as_secs(), 30);
        assert_eq!(conf.server.cors.origins, ["*"]);
        assert_eq!(conf.log.level, tracing::Level::INFO);
        assert_eq!(conf.postgres.port, 5432);
    }
}
