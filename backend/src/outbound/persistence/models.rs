//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Reads decode into domain types through
//! the `into_*` methods, which re-run domain validation so a hand-edited row
//! cannot smuggle invalid values past the type system.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    ETicket, ETicketId, Email, Money, NewETicket, NewReservation, NewTransaction, NewUser,
    Offer, OfferDraft, OfferId, OfferPatch, PaymentMethod, PersonName, Reservation,
    ReservationId, ScanReference, Transaction, TransactionId, TransactionKey, TransactionStatus,
    User, UserId, UserPatch,
};

use super::schema::{e_tickets, offers, reservations, transactions, users};

/// A stored row that no longer satisfies domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowDecodeError {
    #[error("column {column} holds an invalid value: {message}")]
    Invalid {
        column: &'static str,
        message: String,
    },
    #[error("column {column} is out of range")]
    OutOfRange { column: &'static str },
}

impl RowDecodeError {
    fn invalid(column: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Invalid {
            column,
            message: error.to_string(),
        }
    }
}

fn to_count(column: &'static str, value: i32) -> Result<u32, RowDecodeError> {
    u32::try_from(value).map_err(|_| RowDecodeError::OutOfRange { column })
}

/// Convert a domain count into an `INT4` column value.
pub(crate) fn from_count(column: &'static str, value: u32) -> Result<i32, RowDecodeError> {
    i32::try_from(value).map_err(|_| RowDecodeError::OutOfRange { column })
}

fn to_money(column: &'static str, value: Decimal) -> Result<Money, RowDecodeError> {
    Money::new(value).map_err(|err| RowDecodeError::invalid(column, err))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, RowDecodeError> {
        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::new(&self.email).map_err(|err| RowDecodeError::invalid("email", err))?,
            first_name: PersonName::new("first_name", &self.first_name)
                .map_err(|err| RowDecodeError::invalid("first_name", err))?,
            last_name: PersonName::new("last_name", &self.last_name)
                .map_err(|err| RowDecodeError::invalid("last_name", err))?,
            is_admin: self.is_admin,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub is_admin: Option<bool>,
}

impl<'a> From<&'a UserPatch> for UserUpdate<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            first_name: patch.first_name.as_ref().map(PersonName::as_str),
            last_name: patch.last_name.as_ref().map(PersonName::as_str),
            is_admin: patch.is_admin,
        }
    }
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub max_attendees: i32,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OfferRow {
    pub(crate) fn into_offer(self) -> Result<Offer, RowDecodeError> {
        Ok(Offer {
            id: OfferId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            price: to_money("price", self.price)?,
            category: self.category,
            image_url: self.image_url,
            max_attendees: to_count("max_attendees", self.max_attendees)?,
            features: self.features,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offers)]
pub(crate) struct NewOfferRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub category: &'a str,
    pub image_url: Option<&'a str>,
    pub max_attendees: i32,
    pub features: &'a [String],
}

impl<'a> NewOfferRow<'a> {
    pub(crate) fn from_draft(id: OfferId, draft: &'a OfferDraft) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: *id.as_uuid(),
            name: &draft.name,
            description: &draft.description,
            price: draft.price.amount(),
            category: &draft.category,
            image_url: draft.image_url.as_deref(),
            max_attendees: from_count("max_attendees", draft.max_attendees)?,
            features: &draft.features,
        })
    }
}

/// Partial offer update; `updated_at` is always written so the changeset is
/// never empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = offers)]
pub(crate) struct OfferUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub max_attendees: Option<i32>,
    pub features: Option<&'a [String]>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> OfferUpdate<'a> {
    pub(crate) fn from_patch(
        patch: &'a OfferPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, RowDecodeError> {
        Ok(Self {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            price: patch.price.map(Money::amount),
            category: patch.category.as_deref(),
            image_url: patch.image_url.as_deref(),
            max_attendees: patch
                .max_attendees
                .map(|value| from_count("max_attendees", value))
                .transpose()?,
            features: patch.features.as_deref(),
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub transaction_key: Uuid,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl TransactionRow {
    pub(crate) fn into_transaction(self) -> Result<Transaction, RowDecodeError> {
        Ok(Transaction {
            id: TransactionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            amount: to_money("amount", self.amount)?,
            status: self
                .status
                .parse()
                .map_err(|err| RowDecodeError::invalid("status", err))?,
            transaction_key: TransactionKey::from_uuid(self.transaction_key),
            payment_method: self
                .payment_method
                .parse::<PaymentMethod>()
                .map_err(|err| RowDecodeError::invalid("payment_method", err))?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub(crate) struct NewTransactionRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub status: &'a str,
    pub transaction_key: Uuid,
    pub payment_method: &'a str,
}

impl From<&NewTransaction> for NewTransactionRow<'static> {
    fn from(transaction: &NewTransaction) -> Self {
        Self {
            id: *transaction.id.as_uuid(),
            user_id: *transaction.user_id.as_uuid(),
            amount: transaction.amount.amount(),
            status: TransactionStatus::Pending.as_str(),
            transaction_key: *transaction.transaction_key.as_uuid(),
            payment_method: transaction.payment_method.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReservationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub offer_id: Uuid,
    pub quantity: i32,
    pub transaction_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ReservationRow {
    pub(crate) fn into_reservation(self) -> Result<Reservation, RowDecodeError> {
        Ok(Reservation {
            id: ReservationId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            offer_id: OfferId::from_uuid(self.offer_id),
            quantity: to_count("quantity", self.quantity)?,
            transaction_id: TransactionId::from_uuid(self.transaction_id),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub offer_id: Uuid,
    pub quantity: i32,
    pub transaction_id: Uuid,
}

impl TryFrom<&NewReservation> for NewReservationRow {
    type Error = RowDecodeError;

    fn try_from(reservation: &NewReservation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *reservation.id.as_uuid(),
            user_id: *reservation.user_id.as_uuid(),
            offer_id: *reservation.offer_id.as_uuid(),
            quantity: from_count("quantity", reservation.quantity)?,
            transaction_id: *reservation.transaction_id.as_uuid(),
        })
    }
}

// ---------------------------------------------------------------------------
// E-tickets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = e_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ETicketRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub qr_code_url: String,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ETicketRow {
    pub(crate) fn into_eticket(self) -> Result<ETicket, RowDecodeError> {
        Ok(ETicket {
            id: ETicketId::from_uuid(self.id),
            reservation_id: ReservationId::from_uuid(self.reservation_id),
            scan_reference: ScanReference::new(self.qr_code_url)
                .map_err(|err| RowDecodeError::invalid("qr_code_url", err))?,
            is_used: self.is_used,
            used_at: self.used_at,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = e_tickets)]
pub(crate) struct NewETicketRow<'a> {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub qr_code_url: &'a str,
}

impl<'a> From<&'a NewETicket> for NewETicketRow<'a> {
    fn from(ticket: &'a NewETicket) -> Self {
        Self {
            id: *ticket.id.as_uuid(),
            reservation_id: *ticket.reservation_id.as_uuid(),
            qr_code_url: ticket.scan_reference.as_str(),
        }
    }
}
