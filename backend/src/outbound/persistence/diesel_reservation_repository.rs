//! PostgreSQL-backed purchase history reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{ETicketId, OwnedETicket, ReservationWithOffer, UserId};

use super::diesel_error_mapping::{DbFailure, classify_diesel_error, pool_error_message};
use super::models::{ETicketRow, OfferRow, ReservationRow, RowDecodeError};
use super::pool::{DbPool, PoolError};
use super::schema::{e_tickets, offers, reservations};

/// Diesel-backed implementation of the [`ReservationRepository`] port.
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReservationRepositoryError {
    ReservationRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ReservationRepositoryError {
    match classify_diesel_error(error) {
        DbFailure::Connection(message) => ReservationRepositoryError::connection(message),
        DbFailure::Duplicate(message)
        | DbFailure::Referenced(message)
        | DbFailure::Policy(message)
        | DbFailure::Query(message) => ReservationRepositoryError::query(message),
    }
}

fn map_row_error(error: RowDecodeError) -> ReservationRepositoryError {
    ReservationRepositoryError::query(error.to_string())
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReservationWithOffer>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ReservationRow, OfferRow)> = reservations::table
            .inner_join(offers::table)
            .filter(reservations::user_id.eq(user_id.as_uuid()))
            .order((reservations::created_at.desc(), reservations::id.asc()))
            .select((ReservationRow::as_select(), OfferRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(reservation, offer)| {
                Ok(ReservationWithOffer {
                    reservation: reservation.into_reservation().map_err(map_row_error)?,
                    offer: offer.into_offer().map_err(map_row_error)?,
                })
            })
            .collect()
    }

    async fn find_eticket(
        &self,
        id: &ETicketId,
    ) -> Result<Option<OwnedETicket>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(ETicketRow, Uuid)> = e_tickets::table
            .inner_join(reservations::table)
            .filter(e_tickets::id.eq(id.as_uuid()))
            .select((ETicketRow::as_select(), reservations::user_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(ticket, owner)| {
            Ok(OwnedETicket {
                ticket: ticket.into_eticket().map_err(map_row_error)?,
                owner: UserId::from_uuid(owner),
            })
        })
        .transpose()
    }
}
