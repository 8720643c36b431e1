//! Driving port for checkout.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    AuthenticatedWriteSession, CartLineDraft, ETicket, Error, Offer, Reservation, Transaction,
};

/// Cart submitted by an authenticated principal, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub session: AuthenticatedWriteSession,
    pub items: Vec<CartLineDraft>,
}

/// Reservation created by checkout with its offer and tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettledReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub offer: Offer,
    pub e_tickets: Vec<ETicket>,
}

/// Outcome of a committed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub transaction: Transaction,
    /// One entry per cart line, in cart order.
    pub reservations: Vec<SettledReservation>,
}

impl CheckoutResponse {
    /// Total number of tickets issued across all reservations.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.reservations
            .iter()
            .map(|reservation| reservation.e_tickets.len())
            .sum()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutCommand: Send + Sync {
    /// Validate and price the cart, then settle it as one unit of work.
    ///
    /// Never returns `Ok` unless every ticket of every line was written.
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutResponse, Error>;
}
