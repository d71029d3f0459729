//! Operations endpoints: health, readiness and request metrics.
//!
//! Served on the operations listener, separate from the user API. Bodies are
//! small JSON documents and every response carries `Cache-Control: no-store`
//! so probes never see a cached answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use prometheus::{IntCounter, Opts, Registry};
use serde::{Deserialize, Serialize};

/// Service name reported by `GET /health`.
pub const SERVICE_NAME: &str = "user-service";
/// Name of the API request counter in the Prometheus registry.
pub const REQUESTS_TOTAL_METRIC: &str = "user_service_requests_total";

/// Shared process state read by the operations endpoints.
///
/// The request counter is a Prometheus counter registered with the registry
/// handed to [`HealthState::new`]; `/metrics` reports its current value.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    requests_total: IntCounter,
    started_at: DateTime<Utc>,
    clock: Arc<dyn Clock>,
}

impl HealthState {
    /// Create a state that is live but not yet ready, with uptime measured
    /// from the clock's current reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the request counter cannot be registered, for
    /// example when the registry already holds a metric with the same name.
    pub fn new(clock: Arc<dyn Clock>, registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = IntCounter::with_opts(Opts::new(
            REQUESTS_TOTAL_METRIC,
            "Requests served by the user API listener",
        ))?;
        registry.register(Box::new(requests_total.clone()))?;
        let started_at = clock.utc();
        Ok(Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            requests_total,
            started_at,
            clock,
        })
    }

    /// Mark the service as ready once both listeners are bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining. Health probes answer 503 afterwards.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
    }

    /// Whether both listeners are bound and shutdown has not begun.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process is still live. False once draining.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Count one request served by the API listener.
    pub fn record_request(&self) {
        self.requests_total.inc();
    }

    /// Requests counted so far.
    pub fn requests_total(&self) -> u64 {
        self.requests_total.get()
    }

    /// Whole seconds since the state was created. Never negative.
    pub fn uptime_seconds(&self) -> i64 {
        (self.clock.utc() - self.started_at).num_seconds().max(0)
    }

    fn now(&self) -> String {
        self.clock.utc().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthReport {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "2024-05-01T09:00:00Z")]
    pub timestamp: String,
    #[schema(example = "user-service")]
    pub service: String,
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReadinessReport {
    #[schema(example = "ready")]
    pub status: String,
}

/// Body of `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsReport {
    pub requests_total: u64,
    #[schema(example = "42s")]
    pub uptime: String,
}

fn no_store_response<T: Serialize>(ok: bool, body: &T) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Liveness probe. Returns 503 once shutdown has begun.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is healthy", body = HealthReport),
        (status = 503, description = "Service is shutting down", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let alive = state.is_alive();
    let report = HealthReport {
        status: if alive { "healthy" } else { "unhealthy" }.to_owned(),
        timestamp: state.now(),
        service: SERVICE_NAME.to_owned(),
    };
    no_store_response(alive, &report)
}

/// Readiness probe. Returns 503 until both listeners are bound.
#[utoipa::path(
    get,
    path = "/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Service accepts traffic", body = ReadinessReport),
        (status = 503, description = "Service is not ready", body = ReadinessReport)
    )
)]
#[get("/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ready = state.is_ready();
    let report = ReadinessReport {
        status: if ready { "ready" } else { "not_ready" }.to_owned(),
    };
    no_store_response(ready, &report)
}

/// Request counter and uptime.
#[utoipa::path(
    get,
    path = "/metrics",
    tags = ["health"],
    responses((status = 200, description = "Process metrics", body = MetricsReport))
)]
#[get("/metrics")]
pub async fn metrics(state: web::Data<HealthState>) -> HttpResponse {
    let report = MetricsReport {
        requests_total: state.requests_total(),
        uptime: format!("{}s", state.uptime_seconds()),
    };
    no_store_response(true, &report)
}

/// Register the operations endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready).service(metrics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MutableClock, start_instant};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::{fixture, rstest};

    struct Ops {
        state: web::Data<HealthState>,
        clock: Arc<MutableClock>,
        registry: Registry,
    }

    #[fixture]
    fn ops() -> Ops {
        let clock = Arc::new(MutableClock::new(start_instant()));
        let registry = Registry::new();
        let state = web::Data::new(
            HealthState::new(clock.clone(), &registry).expect("counter registers"),
        );
        Ops {
            state,
            clock,
            registry,
        }
    }

    async fn get(state: &web::Data<HealthState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(
            App::new().app_data(state.clone()).configure(configure),
        )
        .await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        (status, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn health_reports_service_and_timestamp(ops: Ops) {
        ops.clock.advance_seconds(90);
        let (status, body) = get(&ops.state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let report: HealthReport = serde_json::from_value(body).expect("health report");
        assert_eq!(
            report,
            HealthReport {
                status: "healthy".to_owned(),
                timestamp: "2024-05-01T09:01:30Z".to_owned(),
                service: SERVICE_NAME.to_owned(),
            }
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn health_fails_once_draining(ops: Ops) {
        ops.state.mark_unhealthy();
        let (status, body) = get(&ops.state, "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_flips_after_mark_ready(ops: Ops) {
        let (status, body) = get(&ops.state, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");

        ops.state.mark_ready();
        let (status, body) = get(&ops.state, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[rstest]
    #[actix_web::test]
    async fn metrics_report_requests_and_uptime(ops: Ops) {
        ops.state.record_request();
        ops.state.record_request();
        ops.clock.advance_seconds(42);

        let (status, body) = get(&ops.state, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        let report: MetricsReport = serde_json::from_value(body).expect("metrics report");
        assert_eq!(report.requests_total, 2);
        assert_eq!(report.uptime, "42s");
    }

    #[rstest]
    fn request_counter_is_exported_through_the_registry(ops: Ops) {
        for _ in 0..3 {
            ops.state.record_request();
        }
        let families = ops.registry.gather();
        assert!(
            families
                .iter()
                .any(|family| family.name() == REQUESTS_TOTAL_METRIC),
            "request counter should be registered"
        );
        let exposition = prometheus::TextEncoder::new()
            .encode_to_string(&families)
            .expect("families encode");
        assert!(exposition.contains("user_service_requests_total 3"));
        assert_eq!(ops.state.requests_total(), 3);
    }

    #[rstest]
    fn registering_twice_in_one_registry_fails(ops: Ops) {
        let clock = Arc::new(MutableClock::new(start_instant()));
        assert!(HealthState::new(clock, &ops.registry).is_err());
    }

    #[rstest]
    fn uptime_never_goes_negative(ops: Ops) {
        ops.clock.advance_seconds(-10);
        assert_eq!(ops.state.uptime_seconds(), 0);
    }
}
