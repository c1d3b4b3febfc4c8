//! Startup settings read from the process environment.
//!
//! All values are validated before the server binds. A missing or malformed
//! credential blob is fatal; the listener address falls back to
//! `0.0.0.0:10000`.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `STORE_CREDENTIALS_JSON` | `{"databaseUrl": "...", "maxConnections": 10, "connectionTimeoutSecs": 30}` |
//! | `PORT` | Listening port, default `10000` |
//! | `BIND_HOST` | Listening address, default `0.0.0.0` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::outbound::persistence::{MigrationError, PoolConfig, PoolError};

/// Credential blob variable.
pub const CREDENTIALS_ENV: &str = "STORE_CREDENTIALS_JSON";
/// Listening port variable.
pub const PORT_ENV: &str = "PORT";
/// Listening address variable.
pub const BIND_HOST_ENV: &str = "BIND_HOST";
/// Port used when `PORT` is unset or blank.
pub const DEFAULT_PORT: u16 = 10000;

const PORT_EXPECTED: &str = "a TCP port number (0-65535)";
const HOST_EXPECTED: &str = "an IPv4 or IPv6 address";

/// Errors that stop the service before it starts serving.
#[derive(thiserror::Error, Debug)]
pub enum StartupConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The credential blob could not be parsed. The blob itself is never
    /// included.
    #[error("malformed credentials in {name}: {message}")]
    MalformedCredentials { name: &'static str, message: String },
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Schema migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CredentialsDocument {
    database_url: String,
    #[serde(default)]
    max_connections: Option<u32>,
    #[serde(default)]
    connection_timeout_secs: Option<u64>,
}

/// Store connection settings taken from the credential blob.
#[derive(Clone)]
pub struct StoreCredentials {
    database_url: Zeroizing<String>,
    max_connections: Option<u32>,
    connection_timeout: Option<Duration>,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("database_url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

impl StoreCredentials {
    /// Parse and validate the JSON credential blob.
    ///
    /// # Examples
    /// ```
    /// use form_intake::settings::StoreCredentials;
    ///
    /// let creds = StoreCredentials::parse(r#"{"databaseUrl":"postgres://db/forms"}"#)
    ///     .expect("valid blob");
    /// assert_eq!(creds.database_url(), "postgres://db/forms");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, StartupConfigError> {
        let malformed = |message: String| StartupConfigError::MalformedCredentials {
            name: CREDENTIALS_ENV,
            message,
        };

        let document: CredentialsDocument = serde_json::from_str(raw).map_err(|err| {
            use serde_json::error::Category;
            match err.classify() {
                Category::Syntax | Category::Eof | Category::Io => malformed(format!(
                    "not valid JSON (line {}, column {})",
                    err.line(),
                    err.column()
                )),
                Category::Data => malformed(err.to_string()),
            }
        })?;
        let database_url = Zeroizing::new(document.database_url);

        if database_url.trim().is_empty() {
            return Err(malformed("databaseUrl must not be empty".to_owned()));
        }
        if document.max_connections == Some(0) {
            return Err(malformed("maxConnections must be at least 1".to_owned()));
        }
        if document.connection_timeout_secs == Some(0) {
            return Err(malformed("connectionTimeoutSecs must be at least 1".to_owned()));
        }

        Ok(Self {
            database_url,
            max_connections: document.max_connections,
            connection_timeout: document.connection_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Database connection URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Pool settings, keeping pool defaults for anything the blob omits.
    pub fn pool_config(&self) -> PoolConfig {
        let mut config = PoolConfig::new(self.database_url.as_str());
        if let Some(max) = self.max_connections {
            config = config.with_max_size(max);
        }
        if let Some(timeout) = self.connection_timeout {
            config = config.with_connection_timeout(timeout);
        }
        config
    }
}

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// Store connection settings.
    pub store: StoreCredentials,
}

impl ServiceSettings {
    /// Read and validate settings from `env`.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, StartupConfigError> {
        let raw = env
            .string(CREDENTIALS_ENV)
            .map(Zeroizing::new)
            .filter(|value| !value.trim().is_empty())
            .ok_or(StartupConfigError::MissingEnv {
                name: CREDENTIALS_ENV,
            })?;
        let store = StoreCredentials::parse(&raw)?;

        let port = port_from_env(env)?;
        let host = host_from_env(env)?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            store,
        })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, StartupConfigError> {
    match non_blank(env, PORT_ENV) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| StartupConfigError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: PORT_EXPECTED,
            }),
    }
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, StartupConfigError> {
    match non_blank(env, BIND_HOST_ENV) {
        None => Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        Some(value) => value
            .parse::<IpAddr>()
            .map_err(|_| StartupConfigError::InvalidEnv {
                name: BIND_HOST_ENV,
                value,
                expected: HOST_EXPECTED,
            }),
    }
}

#[cfg(test)]
mod tests;
