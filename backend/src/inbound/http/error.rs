//! HTTP adapter mapping for domain errors.
//!
//! Keeps [`Error`] free of Actix types while giving handlers consistent JSON
//! error bodies. Extractor failures (malformed JSON bodies, non-numeric
//! query values) are converted here so they share the same shape.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.redacted())
    }
}

/// Error handler for `web::JsonConfig`.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected request body");
    Error::invalid_request("request body is not valid JSON for this operation")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Error handler for `web::QueryConfig`.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected query string");
    Error::invalid_request("query parameters must be integers")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = Error::internal("user store lock poisoned").with_trace_id("t-9");
        let response = error.error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("t-9")
        );
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("internal_error")
        );
    }

    #[actix_web::test]
    async fn invalid_request_keeps_message_and_details() {
        let error = Error::invalid_request("bad").with_details(json!({ "field": "age" }));
        let response = error.error_response();
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
        let body = body_json(response).await;
        assert_eq!(body.get("message").and_then(Value::as_str), Some("bad"));
        assert_eq!(
            body.pointer("/details/field").and_then(Value::as_str),
            Some("age")
        );
    }
}
