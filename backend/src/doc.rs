//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user API paths from the inbound layer, the
//! operations endpoints, and the schema wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::health::{HealthReport, MetricsReport, ReadinessReport};
use crate::inbound::http::schemas::{
    CreateUserResponseSchema, DeleteUserResponseSchema, ErrorCodeSchema, ErrorSchema,
    GetUserResponseSchema, ListUsersResponseSchema, UpdateUserResponseSchema, UserSchema,
};
use crate::inbound::http::users::UserFields;
use utoipa::OpenApi;

/// OpenAPI document for the user API and operations endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "In-memory user records with create, read, update, delete and paged listing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::metrics,
    ),
    components(schemas(
        UserSchema,
        UserFields,
        GetUserResponseSchema,
        CreateUserResponseSchema,
        UpdateUserResponseSchema,
        DeleteUserResponseSchema,
        ListUsersResponseSchema,
        ErrorSchema,
        ErrorCodeSchema,
        HealthReport,
        ReadinessReport,
        MetricsReport,
    )),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Operations listener probes and metrics")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/health")]
    #[case("/ready")]
    #[case("/metrics")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn item_path_documents_three_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/v1/users/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn user_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("User").expect("User schema");
        for field in ["id", "name", "email", "age", "createdAt", "updatedAt"] {
            assert_object_schema_has_field(user, field);
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");
        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }
}
