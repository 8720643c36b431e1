//! Transactions, reservations, and e-tickets created by checkout.
//!
//! Rows of these types are only ever written by settlement. The `New*` drafts
//! carry pre-generated identifiers so a whole checkout can be planned before
//! anything touches the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use super::ids::{ETicketId, ReservationId, TransactionId};
use super::ids::{OfferId, UserId};
use super::money::Money;
use super::offer::Offer;

/// Lifecycle of a checkout transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketingError {
    #[error("transaction cannot move from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },
    #[error("unknown transaction status `{0}`")]
    UnknownStatus(String),
    #[error("unknown payment method `{0}`")]
    UnknownPaymentMethod(String),
    #[error("scan reference must not be empty")]
    EmptyScanReference,
    #[error("ticket was already used at {used_at}")]
    AlreadyUsed { used_at: DateTime<Utc> },
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Move to `next`. Only `pending` may move, to `completed` or `failed`.
    ///
    /// # Errors
    /// Returns [`TicketingError::InvalidTransition`] for anything else.
    pub const fn transition(self, next: Self) -> Result<Self, TicketingError> {
        match (self, next) {
            (Self::Pending, Self::Completed | Self::Failed) => Ok(next),
            (from, to) => Err(TicketingError::InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(TicketingError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Payment method tag. Capture is stubbed; only cards are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            other => Err(TicketingError::UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// Externally facing, unique transaction key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionKey(Uuid);

impl TransactionKey {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Opaque, globally unique reference printed on a ticket and scanned at
/// the door.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScanReference(String);

impl ScanReference {
    pub fn new(raw: impl Into<String>) -> Result<Self, TicketingError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TicketingError::EmptyScanReference);
        }
        Ok(Self(raw))
    }

    /// Reference rendered as a link. A parsed URL is never blank.
    #[must_use]
    pub fn from_url(url: &url::Url) -> Self {
        Self(url.as_str().to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ScanReference {
    type Error = TicketingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScanReference> for String {
    fn from(value: ScanReference) -> Self {
        value.0
    }
}

/// Financial record of one checkout call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: Money,
    pub status: TransactionStatus,
    pub transaction_key: TransactionKey,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// Claim on one offer line within a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub offer_id: OfferId,
    pub quantity: u32,
    pub transaction_id: TransactionId,
    pub created_at: DateTime<Utc>,
}

/// One individually redeemable ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ETicket {
    pub id: ETicketId,
    pub reservation_id: ReservationId,
    #[serde(rename = "qr_code_url")]
    pub scan_reference: ScanReference,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ETicket {
    /// Mark the ticket as used. The flag never goes back to unused.
    ///
    /// # Errors
    /// Returns [`TicketingError::AlreadyUsed`] for a second redemption.
    pub fn redeem(&self, at: DateTime<Utc>) -> Result<Self, TicketingError> {
        if self.is_used {
            return Err(TicketingError::AlreadyUsed {
                used_at: self.used_at.unwrap_or(at),
            });
        }
        Ok(Self {
            is_used: true,
            used_at: Some(at),
            ..self.clone()
        })
    }
}

/// Reservation joined with its offer, as shown in purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationWithOffer {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub offer: Offer,
}

/// Ticket plus the user owning its reservation.
///
/// The owner is an authorisation artefact; only the ticket leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedETicket {
    pub ticket: ETicket,
    pub owner: UserId,
}

/// Transaction row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: Money,
    pub transaction_key: TransactionKey,
    pub payment_method: PaymentMethod,
}

/// Reservation row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub offer_id: OfferId,
    pub quantity: u32,
    pub transaction_id: TransactionId,
}

/// Ticket row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewETicket {
    pub id: ETicketId,
    pub reservation_id: ReservationId,
    pub scan_reference: ScanReference,
}
