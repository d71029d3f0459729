//! HTTP inbound adapter exposing the user API and operations endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the user API: extractor error handlers and the `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(web::scope("/api/v1").configure(users::configure));
}
