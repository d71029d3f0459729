//! Server construction and middleware wiring.
//!
//! Two listeners share one process: the user API and the operations
//! endpoints. Both disable Actix's own signal handling so shutdown can flip
//! the health state before draining.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_service::Trace;
#[cfg(debug_assertions)]
use user_service::doc::ApiDoc;
use user_service::domain::UserStore;
use user_service::inbound::http::configure_api;
use user_service::inbound::http::health::{self, HealthState};
use user_service::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_api_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .configure(configure_api)
        .wrap(Trace)
        .wrap_fn(move |req, srv| {
            health_state.record_request();
            srv.call(req)
        });

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the user API listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_api_server(
    health_state: web::Data<HealthState>,
    store: Arc<UserStore>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(store));
    let server = HttpServer::new(move || build_api_app(health_state.clone(), http_state.clone()))
        .disable_signals()
        .shutdown_timeout(config.shutdown_timeout.as_secs())
        .bind(config.api_addr)?
        .run();
    info!(addr = %config.api_addr, "user API listening");
    Ok(server)
}

/// Bind the operations listener serving health, readiness and metrics.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_ops_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(health_state.clone())
            .configure(health::configure)
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .bind(config.ops_addr)?
    .run();
    info!(addr = %config.ops_addr, "operations endpoints listening");
    Ok(server)
}
