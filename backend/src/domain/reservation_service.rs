//! Purchase history and ticket detail reads.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ReservationQuery, ReservationRepository, ReservationRepositoryError};
use crate::domain::{ETicket, ETicketId, Error, OwnershipGuard, Principal, ReservationWithOffer};

fn map_repository_error(error: ReservationRepositoryError) -> Error {
    match error {
        ReservationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reservation repository unavailable: {message}"))
        }
        ReservationRepositoryError::Query { message } => {
            Error::internal(format!("reservation repository error: {message}"))
        }
    }
}

/// Reservation service implementing [`ReservationQuery`].
#[derive(Clone)]
pub struct ReservationService<R> {
    reservations: Arc<R>,
}

impl<R> ReservationService<R> {
    pub const fn new(reservations: Arc<R>) -> Self {
        Self { reservations }
    }
}

#[async_trait]
impl<R> ReservationQuery for ReservationService<R>
where
    R: ReservationRepository,
{
    async fn list_reservations(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ReservationWithOffer>, Error> {
        let rows = self
            .reservations
            .list_for_user(&principal.id)
            .await
            .map_err(map_repository_error)?;
        // History is always the caller's own, admins included.
        Ok(rows
            .into_iter()
            .filter(|row| row.reservation.user_id == principal.id)
            .collect())
    }

    async fn get_eticket(&self, principal: &Principal, id: &ETicketId) -> Result<ETicket, Error> {
        let owned = self
            .reservations
            .find_eticket(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ticket {id} not found")))?;
        OwnershipGuard::release_ticket(principal, owned)
    }
}
