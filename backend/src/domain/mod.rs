//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the box office (offers,
//! transactions, reservations, e-tickets, users) and the services that
//! enforce checkout, ownership, and admin rules. Nothing here knows about
//! HTTP or SQL; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Money, identifiers, and the entity types.
//! - CheckoutService: the atomic settlement workflow.
//! - OfferService, ReservationService, AccountService, UserProfileService.

pub mod account_service;
pub mod auth;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod offer;
pub mod offer_service;
pub mod ownership;
pub mod ports;
pub mod profile_service;
pub mod reservation_service;
pub mod ticketing;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, AuthValidationError, AuthenticatedWriteSession, LoginCredentials, LoginOutcome,
    PASSWORD_MIN, Registration,
};
pub use self::checkout::{
    Cart, CartLine, CartLineDraft, CartValidationError, CheckoutService,
    MAX_TICKETS_PER_CHECKOUT,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{ETicketId, IdParseError, OfferId, ReservationId, TransactionId, UserId};
pub use self::money::{MAX_AMOUNT, MAX_SCALE, Money, MoneyValidationError};
pub use self::offer::{
    OFFER_CAPACITY_MAX, OFFER_NAME_MAX, Offer, OfferDraft, OfferDraftParts, OfferPatch, OfferPatchParts,
    OfferValidationError,
};
pub use self::offer_service::OfferService;
pub use self::ownership::{Access, OwnershipGuard, require_admin};
pub use self::profile_service::UserProfileService;
pub use self::reservation_service::ReservationService;
pub use self::ticketing::{
    ETicket, NewETicket, NewReservation, NewTransaction, OwnedETicket, PaymentMethod,
    Reservation, ReservationWithOffer, ScanReference, TicketingError, Transaction,
    TransactionKey, TransactionStatus,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, NAME_MAX, NewUser, PersonName, Principal, User, UserPatch, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use box_office::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
