//! Driven port for reading settled reservations and tickets.

use async_trait::async_trait;

use crate::domain::{ETicketId, OwnedETicket, ReservationWithOffer, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reservation repository adapters.
    pub enum ReservationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reservation repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "reservation repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Reservations owned by `user_id` joined with their offers, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReservationWithOffer>, ReservationRepositoryError>;

    /// Ticket joined through its reservation to the owning user.
    async fn find_eticket(
        &self,
        id: &ETicketId,
    ) -> Result<Option<OwnedETicket>, ReservationRepositoryError>;
}
