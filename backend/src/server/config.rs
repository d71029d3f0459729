//! Listener configuration derived from [`ServiceSettings`].

use std::net::SocketAddr;
use std::time::Duration;

use user_service::domain::IdStrategy;
use user_service::settings::{ServiceSettings, SettingsError};

/// Resolved addresses and policies for both listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) api_addr: SocketAddr,
    pub(crate) ops_addr: SocketAddr,
    pub(crate) shutdown_timeout: Duration,
    pub(crate) id_strategy: IdStrategy,
}

impl ServerConfig {
    /// Resolve settings, rejecting malformed hosts and id policies.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, SettingsError> {
        let host = settings.bind_host()?;
        Ok(Self {
            api_addr: SocketAddr::new(host, settings.api_port()),
            ops_addr: SocketAddr::new(host, settings.http_port()),
            shutdown_timeout: settings.shutdown_timeout(),
            id_strategy: settings.id_strategy()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

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

    #[rstest]
    fn defaults_bind_both_ports_on_all_interfaces() {
        let config = ServerConfig::from_settings(&unset()).expect("config");
        assert_eq!(config.api_addr, "0.0.0.0:50051".parse().expect("addr"));
        assert_eq!(config.ops_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(config.id_strategy, IdStrategy::LiveCount);
    }

    #[rstest]
    fn invalid_strategy_fails_resolution() {
        let settings = ServiceSettings {
            id_strategy: Some("nope".to_owned()),
            ..unset()
        };
        assert!(ServerConfig::from_settings(&settings).is_err());
    }
}
