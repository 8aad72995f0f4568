//! Application settings loaded via OrthoConfig.
//!
//! Values come from `FEEDBACK_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RUN_MIGRATIONS: bool = true;

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("FEEDBACK_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEEDBACK")]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
}

impl AppConfig {
    pub fn database_url(&self) -> Result<&str, AppConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(AppConfigError::MissingDatabaseUrl)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AppConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| AppConfigError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn db_max_connections(&self) -> Result<u32, AppConfigError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(AppConfigError::ZeroConnections),
            n => Ok(n),
        }
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Configuration loading against a locked process environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "FEEDBACK_DATABASE_URL",
        "FEEDBACK_BIND_ADDR",
        "FEEDBACK_DB_MAX_CONNECTIONS",
        "FEEDBACK_RUN_MIGRATIONS",
    ];

    fn load() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("feedback-board")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let config = load();
        assert!(matches!(
            config.database_url(),
            Err(AppConfigError::MissingDatabaseUrl)
        ));
        assert_eq!(
            config.bind_addr().expect("default bind addr"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(config.db_max_connections().expect("default pool size"), 10);
        assert!(config.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "FEEDBACK_DATABASE_URL",
                Some("postgres://feedback@localhost/feedback".to_owned()),
            ),
            ("FEEDBACK_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("FEEDBACK_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("FEEDBACK_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let config = load();
        assert_eq!(
            config.database_url().expect("database url"),
            "postgres://feedback@localhost/feedback"
        );
        assert_eq!(
            config.bind_addr().expect("bind addr"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(config.db_max_connections().expect("pool size"), 4);
        assert!(!config.run_migrations());
    }

    #[rstest]
    #[case(Some("not-an-address"), None)]
    #[case(None, Some("0"))]
    fn invalid_values_are_reported(
        #[case] bind_addr: Option<&str>,
        #[case] max_connections: Option<&str>,
    ) {
        let _guard = lock_env([
            ("FEEDBACK_DATABASE_URL", Some("postgres://localhost/db".to_owned())),
            ("FEEDBACK_BIND_ADDR", bind_addr.map(str::to_owned)),
            ("FEEDBACK_DB_MAX_CONNECTIONS", max_connections.map(str::to_owned)),
            ("FEEDBACK_RUN_MIGRATIONS", None),
        ]);

        let config = load();
        if bind_addr.is_some() {
            assert!(matches!(
                config.bind_addr(),
                Err(AppConfigError::InvalidBindAddr { .. })
            ));
        } else {
            assert!(matches!(
                config.db_max_connections(),
                Err(AppConfigError::ZeroConnections)
            ));
        }
    }
}
