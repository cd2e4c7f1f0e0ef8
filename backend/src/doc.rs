//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers:
//!
//! - **Paths**: the `/api/user` endpoints and the health probes
//! - **Schemas**: request/response DTOs plus the [`ErrorSchema`] and
//!   [`ErrorCodeSchema`] wrappers, so domain types stay free of utoipa
//! - **Security**: the `Authorization: Token <key>` scheme
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    CreateUserRequest, ProfileResponse, TokenRequest, TokenResponse, UpdateProfileBody,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the token security scheme in the generated document.
pub const TOKEN_SECURITY_SCHEME: &str = "TokenAuth";

/// Enrich the generated document with the token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <key>` or `Bearer <key>` using the key from POST /api/user/token.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe backend API",
        description = "User registration, token authentication and profile self-service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::create_token,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserRequest,
        TokenRequest,
        TokenResponse,
        ProfileResponse,
        UpdateProfileBody
    )),
    tags(
        (name = "users", description = "Account registration, tokens and profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
