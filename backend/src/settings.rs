//! Service configuration loaded via OrthoConfig.
//!
//! Layers: defaults, then a configuration file, then `USER_SERVICE_*`
//! environment variables, then command-line flags.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{IdStrategy, IdStrategyParseError};

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    IdStrategy(#[from] IdStrategyParseError),
    #[error("invalid bind host `{value}`")]
    BindHost { value: String },
}

/// Configuration values for the user service process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServiceSettings {
    /// Port of the user API listener.
    #[ortho_config(default = 50051)]
    pub api_port: u16,
    /// Port of the health, readiness and metrics listener.
    #[ortho_config(default = 8080)]
    pub http_port: u16,
    /// Address both listeners bind to.
    pub bind_host: Option<String>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// Identifier allocation policy: `live-count`, `sequential` or `random`.
    pub id_strategy: Option<String>,
    /// Grace period, in seconds, for in-flight requests on shutdown.
    #[ortho_config(default = 30)]
    pub shutdown_timeout_secs: u64,
}

impl ServiceSettings {
    /// Port of the user API listener.
    pub fn api_port(&self) -> u16 {
        self.api_port
    }

    /// Port of the operations listener.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Return the bind address, falling back to all interfaces.
    pub fn bind_host(&self) -> Result<IpAddr, SettingsError> {
        match self.bind_host.as_deref() {
            None => Ok(DEFAULT_BIND_HOST),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| SettingsError::BindHost {
                    value: value.to_owned(),
                }),
        }
    }

    /// Log filter directive, falling back to `info`.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Return the configured id policy, falling back to live count.
    pub fn id_strategy(&self) -> Result<IdStrategy, SettingsError> {
        match self.id_strategy.as_deref() {
            None => Ok(IdStrategy::default()),
            Some(value) => Ok(value.parse()?),
        }
    }

    /// Grace period granted to in-flight requests on shutdown.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "USER_SERVICE_API_PORT",
        "USER_SERVICE_HTTP_PORT",
        "USER_SERVICE_BIND_HOST",
        "USER_SERVICE_LOG_LEVEL",
        "USER_SERVICE_ID_STRATEGY",
        "USER_SERVICE_SHUTDOWN_TIMEOUT_SECS",
    ];

    fn unset() -> ServiceSettings {
        ServiceSettings {
            api_port: 50051,
            http_port: 8080,
            bind_host: None,
            log_level: None,
            id_strategy: None,
            shutdown_timeout_secs: 30,
        }
    }

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    #[rstest]
    fn loads_from_an_empty_environment() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let loaded = ServiceSettings::load_from_iter([OsString::from("user-service")]);
        assert!(loaded.is_ok(), "no configuration at all must still load");
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.api_port(), 50051);
        assert_eq!(settings.http_port(), 8080);
        assert_eq!(
            settings.bind_host().expect("bind host"),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
        assert_eq!(settings.log_level(), "info");
        assert_eq!(
            settings.id_strategy().expect("strategy"),
            IdStrategy::LiveCount
        );
        assert_eq!(settings.shutdown_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_SERVICE_API_PORT", Some("6000".to_owned())),
            ("USER_SERVICE_HTTP_PORT", Some("6001".to_owned())),
            ("USER_SERVICE_BIND_HOST", Some("127.0.0.1".to_owned())),
            ("USER_SERVICE_LOG_LEVEL", Some("debug".to_owned())),
            ("USER_SERVICE_ID_STRATEGY", Some("sequential".to_owned())),
            ("USER_SERVICE_SHUTDOWN_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_port(), 6000);
        assert_eq!(settings.http_port(), 6001);
        assert_eq!(
            settings.bind_host().expect("bind host"),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
        assert_eq!(settings.log_level(), "debug");
        assert_eq!(
            settings.id_strategy().expect("strategy"),
            IdStrategy::Sequential
        );
        assert_eq!(settings.shutdown_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn unknown_id_strategy_is_rejected() {
        let settings = ServiceSettings {
            id_strategy: Some("alphabetical".to_owned()),
            ..unset()
        };
        let err = settings.id_strategy().expect_err("invalid strategy");
        assert!(matches!(err, SettingsError::IdStrategy(_)));
    }

    #[rstest]
    fn malformed_bind_host_is_rejected() {
        let settings = ServiceSettings {
            bind_host: Some("not an address".to_owned()),
            ..unset()
        };
        assert!(matches!(
            settings.bind_host(),
            Err(SettingsError::BindHost { .. })
        ));
    }
}
