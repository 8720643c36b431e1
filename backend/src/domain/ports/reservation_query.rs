//! Driving port for purchase history and ticket detail reads.

use async_trait::async_trait;

use crate::domain::{ETicket, ETicketId, Error, Principal, ReservationWithOffer};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// The principal's own reservations, newest first.
    async fn list_reservations(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ReservationWithOffer>, Error>;

    /// One ticket, readable by its owner or an admin.
    async fn get_eticket(&self, principal: &Principal, id: &ETicketId) -> Result<ETicket, Error>;
}
