// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Holdyard API.
// It can be used by both the main API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::auth;
use holdyard_core::{Container, ContainerView, HoldTypeEntry, HoldTypeEntryView, UserSummary};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Holdyard API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::login,
        api::containers::list_containers,
        api::containers::delete_container,
        api::containers::add_hold_type,
        api::containers::disable_hold_type,
    ),
    components(
        schemas(
            Container, HoldTypeEntry, ContainerView, HoldTypeEntryView, UserSummary,
            auth::routes::LoginRequest, auth::routes::TokenResponse,
            api::containers::HoldTypeRequest,
            api::containers::ListContainersResponse,
            api::containers::PagedContainersResponse,
            api::ErrorResponse, api::MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and token issuance"),
        (name = "containers", description = "Container hold-type management")
    ),
    info(
        title = "Holdyard API",
        version = "0.1.0",
        description = "API for placing and lifting administrative holds on shipping containers",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Registers the bearer JWT scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}
