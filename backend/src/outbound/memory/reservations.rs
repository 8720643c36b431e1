//! Purchase history reads over the in-memory tables.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{ETicketId, OwnedETicket, ReservationWithOffer, UserId};

use super::InMemoryBoxOffice;

#[async_trait]
impl ReservationRepository for InMemoryBoxOffice {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReservationWithOffer>, ReservationRepositoryError> {
        let tables = self.lock_tables();
        let mut rows = tables
            .reservations
            .iter()
            .filter(|reservation| reservation.user_id == *user_id)
            .map(|reservation| {
                tables
                    .offers
                    .iter()
                    .find(|offer| offer.id == reservation.offer_id)
                    .map(|offer| ReservationWithOffer {
                        reservation: reservation.clone(),
                        offer: offer.clone(),
                    })
                    .ok_or_else(|| {
                        ReservationRepositoryError::query(format!(
                            "reservation {} references a missing offer",
                            reservation.id
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by_key(|row| Reverse(row.reservation.created_at));
        Ok(rows)
    }

    async fn find_eticket(
        &self,
        id: &ETicketId,
    ) -> Result<Option<OwnedETicket>, ReservationRepositoryError> {
        let tables = self.lock_tables();
        let Some(ticket) = tables.etickets.iter().find(|ticket| ticket.id == *id) else {
            return Ok(None);
        };
        let owner = tables
            .reservations
            .iter()
            .find(|reservation| reservation.id == ticket.reservation_id)
            .map(|reservation| reservation.user_id)
            .ok_or_else(|| {
                ReservationRepositoryError::query(format!(
                    "ticket {id} references a missing reservation"
                ))
            })?;
        Ok(Some(OwnedETicket {
            ticket: ticket.clone(),
            owner,
        }))
    }
}
