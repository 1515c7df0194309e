//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] assembles the specification from the inbound handlers' path
//! annotations and the domain schemas. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AuthorSummary, BookedServiceSummary, Booking, BookingDetails, BookingStatus, Category,
    ContactSummary, Error, ErrorCode, EventListing, PaymentStatus, PaymentView, PostDetails, Role,
    Service, ServiceListing, SocialPost, SupplierSummary, UserId, UserProfile,
};
use crate::inbound::http::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::bookings::CreateBookingRequest;
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::payments::{PaymentDecisionRequest, PaymentDecisionResponse};
use crate::inbound::http::services::CreateServiceRequest;
use crate::inbound::http::social::CreatePostRequest;

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
                "id",
                "Session cookie issued by POST /api/v1/auth/login.",
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
        title = "ServiceHub backend API",
        description = "Marketplace HTTP interface: auth, services, bookings, \
                       payment verification, events, and the social feed.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::services::list_services,
        crate::inbound::http::services::create_service,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::payments::list_payments,
        crate::inbound::http::payments::decide_payment,
        crate::inbound::http::events::list_events,
        crate::inbound::http::social::list_feed,
        crate::inbound::http::social::create_post,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserId,
        Role,
        UserProfile,
        ContactSummary,
        Category,
        Service,
        SupplierSummary,
        ServiceListing,
        BookingStatus,
        Booking,
        BookedServiceSummary,
        BookingDetails,
        PaymentStatus,
        PaymentView,
        EventListing,
        SocialPost,
        AuthorSummary,
        PostDetails,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        CreateServiceRequest,
        CreateBookingRequest,
        PaymentDecisionRequest,
        PaymentDecisionResponse,
        CreatePostRequest,
        HealthStatus,
    )),
    tags(
        (name = "auth", description = "Registration and session login"),
        (name = "services", description = "Service catalogue"),
        (name = "bookings", description = "Bookings and their lifecycle"),
        (name = "payments", description = "Admin payment verification"),
        (name = "events", description = "Curated events catalogue"),
        (name = "social", description = "Shared social feed"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;

    #[rstest]
    fn registers_all_marketplace_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/register",
            "/api/v1/auth/login",
            "/api/v1/services",
            "/api/v1/bookings",
            "/api/v1/payments",
            "/api/v1/events",
            "/api/v1/social",
            "/healthz/live",
            "/healthz/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path}"
            );
        }
    }

    #[rstest]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.keys().any(|name| name.ends_with("Error")));
    }
}
