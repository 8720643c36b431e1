//! Process configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `BOX_OFFICE_*` environment variables
//! and configuration files, in that order of precedence. Unset options fall
//! back to the defaults exposed by the accessors below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_STATEMENT_TIMEOUT, PoolConfig};
use crate::outbound::tickets::{DEFAULT_QR_BASE_URL, DEFAULT_QR_SIZE};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the box office server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOX_OFFICE")]
pub struct BoxOfficeSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Required unless fixture mode is on.
    pub database_url: Option<String>,
    pub pool_max_size: Option<u32>,
    pub pool_min_idle: Option<u32>,
    pub pool_timeout_secs: Option<u64>,
    /// Upper bound for each settlement statement.
    pub statement_timeout_ms: Option<u64>,
    /// Leave the schema alone at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Base URL of the GoTrue-compatible identity service.
    pub identity_url: Option<String>,
    /// API key sent as `apikey` to the identity service.
    pub identity_api_key: Option<String>,
    pub identity_timeout_secs: Option<u64>,
    /// QR rendering endpoint used for ticket references.
    pub qr_base_url: Option<String>,
    /// Rendered QR size, e.g. `100x100`.
    pub qr_size: Option<String>,
    /// Serve from in-memory adapters with a local identity provider.
    #[ortho_config(default = false)]
    pub fixture_mode: bool,
    /// Admin account created at start-up in fixture mode.
    pub fixture_admin_email: Option<String>,
    pub fixture_admin_password: Option<String>,
}

impl BoxOfficeSettings {
    #[must_use]
    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool settings for `database_url`; unset sizing keeps the pool defaults.
    #[must_use]
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let config = PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ));
        match self.pool_min_idle {
            Some(min_idle) => config.with_min_idle(Some(min_idle)),
            None => config,
        }
    }

    #[must_use]
    pub fn statement_timeout(&self) -> Duration {
        self.statement_timeout_ms
            .map_or(DEFAULT_STATEMENT_TIMEOUT, Duration::from_millis)
    }

    #[must_use]
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_secs
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn qr_base_url(&self) -> &str {
        self.qr_base_url.as_deref().unwrap_or(DEFAULT_QR_BASE_URL)
    }

    #[must_use]
    pub fn qr_size(&self) -> &str {
        self.qr_size.as_deref().unwrap_or(DEFAULT_QR_SIZE)
    }
}
