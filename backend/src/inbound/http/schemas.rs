//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema mirrors are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// Checkout could not be settled; nothing was committed.
    #[schema(rename = "settlement_failed")]
    SettlementFailed,
    /// A backing service is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    is_admin: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Offer`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Offer)]
pub struct OfferSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Weekend Pass")]
    name: String,
    description: String,
    /// Decimal amount with at most two fractional digits.
    #[schema(example = "50.00")]
    price: String,
    /// Offer category label.
    #[schema(rename = "type", example = "pass")]
    category: String,
    image_url: Option<String>,
    #[schema(example = 500)]
    max_attendees: u32,
    features: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    updated_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Transaction`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Transaction)]
pub struct TransactionSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(example = "130.00")]
    amount: String,
    #[schema(example = "completed")]
    status: String,
    /// Unique idempotency key assigned at checkout.
    #[schema(value_type = String, format = Uuid)]
    transaction_key: String,
    #[schema(example = "card")]
    payment_method: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ETicket`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ETicket)]
pub struct ETicketSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    reservation_id: String,
    /// Scannable reference rendered as a QR code.
    #[schema(
        example = "https://api.qrserver.com/v1/create-qr-code/?data=8c1d0f6e-4a3b-4f7e-9d21-5b6a7c8d9e0f&size=100x100"
    )]
    qr_code_url: String,
    is_used: bool,
    #[schema(value_type = Option<String>, format = DateTime)]
    used_at: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ReservationWithOffer`].
///
/// A purchase history entry: the reservation fields with the offer inlined.
#[derive(ToSchema)]
#[schema(as = crate::domain::ReservationWithOffer)]
pub struct ReservationSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = Uuid)]
    offer_id: String,
    #[schema(example = 2)]
    quantity: u32,
    #[schema(value_type = String, format = Uuid)]
    transaction_id: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    offer: OfferSchema,
}

/// OpenAPI schema for [`crate::domain::ports::SettledReservation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SettledReservation)]
pub struct SettledReservationSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = Uuid)]
    offer_id: String,
    #[schema(example = 2)]
    quantity: u32,
    #[schema(value_type = String, format = Uuid)]
    transaction_id: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    offer: OfferSchema,
    e_tickets: Vec<ETicketSchema>,
}
