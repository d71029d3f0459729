//! End-to-end checks of the user API through the public library surface.
//!
//! The app is assembled the same way the binary assembles it: trace
//! middleware, extractor error handlers and the `/api/v1` scope over a seeded
//! store.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use user_service::Trace;
use user_service::domain::{IdStrategy, TRACE_ID_HEADER, TraceId};
use user_service::inbound::http::configure_api;
use user_service::inbound::http::state::HttpState;
use user_service::test_support::store_with_clock;

macro_rules! service {
    ($strategy:expr) => {{
        let (store, _clock) = store_with_clock($strategy);
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(Arc::new(store))))
                .configure(configure_api)
                .wrap(Trace),
        )
        .await
    }};
}

#[actix_web::test]
async fn create_list_delete_round() {
    let app = service!(IdStrategy::LiveCount);

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "A", "email": "a@x.com", "age": 20 }))
            .to_request(),
    )
    .await;
    assert_eq!(created["user"]["id"], "3");

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?page=1&limit=10")
            .to_request(),
    )
    .await;
    assert_eq!(listed["total"], 3);
    assert_eq!(listed["users"].as_array().map(Vec::len), Some(3));

    let deleted: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/users/3")
            .to_request(),
    )
    .await;
    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["message"], "User deleted successfully");

    let missing = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/3").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::OK);
    let missing: Value = test::read_body_json(missing).await;
    assert_eq!(missing["success"], false);
    assert!(missing.get("user").is_none());
}

#[actix_web::test]
async fn responses_carry_a_trace_id() {
    let app = service!(IdStrategy::LiveCount);
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/1").to_request(),
    )
    .await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header");
    assert!(header.parse::<TraceId>().is_ok());
}

#[actix_web::test]
async fn rejected_query_echoes_trace_id_in_body() {
    let app = service!(IdStrategy::LiveCount);
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?limit=ten")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"], header.as_str());
}

#[actix_web::test]
async fn random_ids_are_uuids() {
    let app = service!(IdStrategy::Random);
    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "R" }))
            .to_request(),
    )
    .await;
    let id = created["user"]["id"].as_str().expect("string id");
    assert!(id.parse::<uuid::Uuid>().is_ok());
    assert_eq!(created["user"]["age"], 0);
    assert_eq!(created["user"]["email"], "");
}
