use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::items::{
    dtos as items_dtos, handlers as items_handlers, models as items_models,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_me,
        // Items
        items_handlers::submit_found_item,
        items_handlers::submit_lost_item,
        items_handlers::get_all_items,
        items_handlers::get_lost_items,
        items_handlers::claim_item,
    ),
    components(
        schemas(
            // Shared
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_model::SessionUser>,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            auth_model::SessionUser,
            // Items
            items_models::FoundItem,
            items_models::LostItem,
            items_dtos::ClaimItemDocDto,
            items_dtos::SubmitFoundItemDto,
            items_dtos::SubmitLostItemDto,
        )
    ),
    tags(
        (name = "auth", description = "Session login, logout and current user"),
        (name = "items", description = "Lost and found item reports and claims"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Lost & Found API",
        version = "0.1.0",
        description = "API documentation for the lost and found service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
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

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_item_and_auth_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/submitFoundItem",
            "/api/submitLostItem",
            "/getAllItems",
            "/getLostItems",
            "/claimItem/{id}",
            "/api/auth/login",
            "/api/auth/me",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }

    #[test]
    fn test_envelope_schema_has_no_pagination_meta() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        assert!(!schemas.contains_key("Meta"));
        assert!(schemas.keys().any(|name| name.starts_with("ApiResponse")));
        assert!(schemas.contains_key("ClaimItemDocDto"));
    }
}
