//! Service configuration loaded via OrthoConfig.
//!
//! Values layer as defaults, then a config file, then `TERRITORY_*`
//! environment variables, then CLI flags.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime settings for the territory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TERRITORY")]
pub struct TerritorySettings {
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection before failing a store call.
    pub pool_timeout_secs: Option<u64>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Insert the sample territories when the store is empty.
    #[ortho_config(default = false)]
    pub seed_sample_data: bool,
}

impl TerritorySettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error for a malformed address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Pool settings for the configured database, if any.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url);
        if let Some(size) = self.pool_max_size {
            config = config.with_max_size(size);
        }
        if let Some(secs) = self.pool_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "TERRITORY_DATABASE_URL",
        "TERRITORY_BIND_ADDR",
        "TERRITORY_POOL_MAX_SIZE",
        "TERRITORY_POOL_TIMEOUT_SECS",
        "TERRITORY_RUN_MIGRATIONS",
        "TERRITORY_SEED_SAMPLE_DATA",
    ];

    fn load_from_empty_args() -> TerritorySettings {
        TerritorySettings::load_from_iter([OsString::from("territory-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_select_the_in_memory_store() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert!(settings.pool_config().is_none());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.run_migrations);
        assert!(!settings.seed_sample_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "TERRITORY_DATABASE_URL",
                Some("postgres://localhost/territories".to_owned()),
            ),
            ("TERRITORY_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("TERRITORY_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TERRITORY_POOL_TIMEOUT_SECS", Some("5".to_owned())),
            ("TERRITORY_RUN_MIGRATIONS", Some("false".to_owned())),
            ("TERRITORY_SEED_SAMPLE_DATA", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let pool = settings.pool_config().expect("database configured");

        assert_eq!(pool.database_url(), "postgres://localhost/territories");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert!(!settings.run_migrations);
        assert!(settings.seed_sample_data);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env([("TERRITORY_BIND_ADDR", Some("not-an-address".to_owned()))]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
