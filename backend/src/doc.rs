//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the schema
//! mirrors from [`crate::inbound::http::schemas`] and the bearer security
//! scheme. The document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary.

use crate::inbound::http::admin::{CreateOfferRequest, UpdateOfferRequest, UpdateUserRequest};
use crate::inbound::http::checkout::{CheckoutBody, CheckoutItemRequest};
use crate::inbound::http::schemas::{
    ETicketSchema, ErrorCodeSchema, ErrorSchema, OfferSchema, ReservationSchema,
    SettledReservationSchema, TransactionSchema, UserSchema,
};
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, ProfileUpdateRequest, RegisterRequest,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the `bearer` scheme referenced by authenticated operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Box office API",
        description = "Ticket catalogue, checkout, purchase history and administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearer" = [])),
    paths(
        crate::inbound::http::checkout::checkout,
        crate::inbound::http::offers::list_offers,
        crate::inbound::http::offers::get_offer,
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::reservations::get_eticket,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::admin::create_offer,
        crate::inbound::http::admin::update_offer,
        crate::inbound::http::admin::delete_offer,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::get_user,
        crate::inbound::http::admin::update_user,
        crate::inbound::http::admin::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        OfferSchema,
        TransactionSchema,
        ReservationSchema,
        SettledReservationSchema,
        ETicketSchema,
        CheckoutBody,
        CheckoutItemRequest,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        ProfileUpdateRequest,
        CreateOfferRequest,
        UpdateOfferRequest,
        UpdateUserRequest,
    )),
    tags(
        (name = "checkout", description = "Buying tickets"),
        (name = "offers", description = "Public catalogue"),
        (name = "reservations", description = "Purchase history and tickets"),
        (name = "users", description = "Accounts and profiles"),
        (name = "admin", description = "Catalogue and user administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
