//! OpenAPI document assembly. The document is aggregated at build time
//! from the route annotations and the payload schemas; the server injects
//! the `servers` list at startup since it depends on runtime configuration.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::openapi::server::ServerBuilder;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OrderHub API",
        description = "OrderHub is a scalable and secure RESTful API for managing customer orders. Sellers manage orders and update their status, while buyers place and monitor their orders.",
        license(name = "ISC")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::users::create_user,
        crate::routes::sessions::create_session,
        crate::routes::deliveries::create_delivery,
        crate::routes::deliveries::list_deliveries,
        crate::routes::deliveries::get_delivery,
        crate::routes::deliveries::update_delivery_status,
        crate::routes::delivery_logs::create_delivery_log,
        crate::routes::delivery_logs::show_delivery_logs
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::error::ValidationErrorResponse,
            crate::error::ValidationIssue,
            crate::error::ServerErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::UserRole,
            crate::routes::models::DeliveryStatus,
            crate::routes::models::User,
            crate::routes::models::UserSummary,
            crate::routes::models::Delivery,
            crate::routes::models::DeliveryLog,
            crate::routes::models::CreateUserRequest,
            crate::routes::models::CreateSessionRequest,
            crate::routes::models::CreateDeliveryRequest,
            crate::routes::models::UpdateDeliveryStatusRequest,
            crate::routes::models::CreateDeliveryLogRequest,
            crate::routes::users::CreateUserResponse,
            crate::routes::sessions::CreateSessionResponse,
            crate::routes::deliveries::DeliveryResponse,
            crate::routes::deliveries::DeliveriesListResponse,
            crate::routes::delivery_logs::DeliveryLogResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Users", description = "User account creation"),
        (name = "Sessions", description = "Authentication and JWT issuance"),
        (name = "Deliveries", description = "Delivery and order operations"),
        (name = "Delivery Logs", description = "Delivery tracking logs")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("JWT".to_string());
            http.description = Some(
                "JWT obtained from the /sessions endpoint. Format: Bearer {token}".to_string(),
            );
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}

/// Build the OpenAPI document with the server list filled in.
pub fn openapi_document(
    local_url: &str,
    prod_server_url: Option<&str>,
) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let mut servers = vec![ServerBuilder::new()
        .url(local_url)
        .description(Some("Local development server"))
        .build()];

    if let Some(url) = prod_server_url {
        servers.push(
            ServerBuilder::new()
                .url(url)
                .description(Some("Production server"))
                .build(),
        );
    }

    doc.servers = Some(servers);
    doc
}
