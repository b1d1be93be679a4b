//! Application settings loaded via OrthoConfig.
//!
//! Values come from `UNBLOCK_*` environment variables, optional config files
//! and command-line flags. Session cookie settings are read separately, see
//! [`crate::inbound::http::session_config`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 5;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} is not a valid socket address: {value}")]
    InvalidSocketAddr { field: &'static str, value: String },
    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Process-wide settings controlling adapters and the listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UNBLOCK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Push gateway endpoint. Without it notifications are only logged.
    pub push_endpoint: Option<String>,
    /// Timeout applied to each push request.
    pub push_timeout_secs: Option<u64>,
    /// Token-info endpoint of the identity provider. Without it the
    /// development token is accepted.
    pub identity_endpoint: Option<String>,
    /// Timeout applied to each identity lookup.
    pub identity_timeout_secs: Option<u64>,
}

fn parse_url(field: &'static str, raw: &str) -> Result<reqwest::Url, SettingsError> {
    reqwest::Url::parse(raw.trim()).map_err(|_| SettingsError::InvalidUrl {
        field,
        value: raw.to_owned(),
    })
}

fn positive_secs(
    field: &'static str,
    value: Option<u64>,
    default: u64,
) -> Result<Duration, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { field }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

impl AppSettings {
    /// Listener address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidSocketAddr {
                field: "bind_addr",
                value: raw.to_owned(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections {
            0 => Err(SettingsError::Zero {
                field: "db_max_connections",
            }),
            max => Ok(max),
        }
    }

    /// Push gateway URL, if one is configured.
    pub fn push_endpoint(&self) -> Result<Option<reqwest::Url>, SettingsError> {
        self.push_endpoint
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_url("push_endpoint", raw))
            .transpose()
    }

    pub fn push_timeout(&self) -> Result<Duration, SettingsError> {
        positive_secs(
            "push_timeout_secs",
            self.push_timeout_secs,
            DEFAULT_PUSH_TIMEOUT_SECS,
        )
    }

    /// Identity provider token-info URL, if one is configured.
    pub fn identity_endpoint(&self) -> Result<Option<reqwest::Url>, SettingsError> {
        self.identity_endpoint
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_url("identity_endpoint", raw))
            .transpose()
    }

    pub fn identity_timeout(&self) -> Result<Duration, SettingsError> {
        positive_secs(
            "identity_timeout_secs",
            self.identity_timeout_secs,
            DEFAULT_IDENTITY_TIMEOUT_SECS,
        )
    }
}
