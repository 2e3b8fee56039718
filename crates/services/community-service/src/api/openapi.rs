//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::community_handler::{JoinRequest, JoinResponse};
use domain::{Community, JoinOutcome};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::community_handler::list_communities,
        crate::api::handlers::community_handler::join_community,
        crate::api::handlers::community_handler::membership_status,
    ),
    components(schemas(Community, JoinOutcome, JoinRequest, JoinResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Communities", description = "Community listing and membership endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
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
