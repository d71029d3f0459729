//! User record service library.
//!
//! The domain layer holds the record store and its driving port; the inbound
//! layer exposes it over HTTP alongside health and metrics endpoints.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
