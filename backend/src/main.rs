//! Service entry-point: loads settings, wires the record store into both
//! listeners and coordinates graceful shutdown.

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use prometheus::Registry;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_api_server, create_ops_server};
use user_service::domain::UserStore;
use user_service::inbound::http::health::HealthState;
use user_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = ServiceSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|error| io::Error::other(format!("failed to load settings: {error}")))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_settings(&settings)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let clock = Arc::new(DefaultClock);
    let store = Arc::new(UserStore::new(clock.clone(), config.id_strategy));
    let registry = Registry::new();
    let health_state = web::Data::new(
        HealthState::new(clock, &registry)
            .map_err(|error| io::Error::other(format!("metrics registration failed: {error}")))?,
    );

    let api = create_api_server(health_state.clone(), store, &config)?;
    let ops = create_ops_server(health_state.clone(), &config)?;
    let api_handle = api.handle();
    let ops_handle = ops.handle();

    let draining = health_state.clone();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received; draining listeners");
        draining.mark_unhealthy();
        futures_util::join!(api_handle.stop(true), ops_handle.stop(true));
    });

    health_state.mark_ready();
    info!(id_strategy = %config.id_strategy, "user service ready");
    tokio::try_join!(api, ops)?;
    info!("user service stopped");
    Ok(())
}

/// Resolve on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(error) = result {
                            warn!(%error, "failed to listen for SIGINT");
                        }
                    }
                    _ = terminate.recv() => {}
                }
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                if let Err(error) = tokio::signal::ctrl_c().await {
                    warn!(%error, "failed to listen for SIGINT");
                }
            }
        }
    }
    #[cfg(not(unix))]
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for SIGINT");
    }
}
