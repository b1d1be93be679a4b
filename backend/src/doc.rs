//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint of the inbound layer (users, cars,
//!   relations, catalog, health)
//! - **Schemas**: request and response bodies plus the domain error mirrors
//!   ([`ErrorSchema`], [`ErrorCodeSchema`])
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::cars::RegisterCarRequestBody;
use crate::inbound::http::catalog::CatalogEntryResponse;
use crate::inbound::http::dto::{
    CarRelationsResponse, CarResponse, DispatchReportResponse, OwnerResponse, RelatedCarResponse,
    RelationChangeResponse, UserResponse,
};
use crate::inbound::http::relations::{CreateRelationRequestBody, ReleaseRequestResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, NotificationTokenRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Unblock backend API",
        description = "Drivers register cars, report which car blocks which, and \
                       push notifications tell the owners on both sides.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_notification_token,
        crate::inbound::http::users::my_cars,
        crate::inbound::http::cars::register_car,
        crate::inbound::http::cars::find_car,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::claim_car,
        crate::inbound::http::cars::list_owners,
        crate::inbound::http::relations::create_relation,
        crate::inbound::http::relations::remove_relation,
        crate::inbound::http::relations::list_relations,
        crate::inbound::http::relations::request_release,
        crate::inbound::http::catalog::list_brands,
        crate::inbound::http::catalog::list_colors,
        crate::inbound::http::catalog::list_countries,
        crate::inbound::http::catalog::list_notification_kinds,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        NotificationTokenRequest,
        RegisterCarRequestBody,
        CreateRelationRequestBody,
        UserResponse,
        OwnerResponse,
        CarResponse,
        RelatedCarResponse,
        CarRelationsResponse,
        DispatchReportResponse,
        RelationChangeResponse,
        ReleaseRequestResponse,
        CatalogEntryResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Sign-in, profile and notification token"),
        (name = "cars", description = "Car registration, lookup and ownership"),
        (name = "relations", description = "Which car blocks which"),
        (name = "catalog", description = "Brand, colour, country and notification codes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
