//! PostgreSQL-backed `OfferRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{OfferRepository, OfferRepositoryError};
use crate::domain::{Offer, OfferDraft, OfferId, OfferPatch};

use super::diesel_error_mapping::{DbFailure, classify_diesel_error, pool_error_message};
use super::models::{NewOfferRow, OfferRow, OfferUpdate, RowDecodeError};
use super::pool::{DbPool, PoolError};
use super::schema::offers;

/// Diesel-backed offer catalogue.
#[derive(Clone)]
pub struct DieselOfferRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselOfferRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// `clock` stamps `updated_at` on edits; creation time comes from the
    /// column default.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> OfferRepositoryError {
    OfferRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> OfferRepositoryError {
    match classify_diesel_error(error) {
        DbFailure::Connection(message) => OfferRepositoryError::connection(message),
        DbFailure::Referenced(message) => OfferRepositoryError::referenced(message),
        DbFailure::Duplicate(message) | DbFailure::Policy(message) | DbFailure::Query(message) => {
            OfferRepositoryError::query(message)
        }
    }
}

fn map_row_error(error: RowDecodeError) -> OfferRepositoryError {
    OfferRepositoryError::query(error.to_string())
}

fn decode_all(rows: Vec<OfferRow>) -> Result<Vec<Offer>, OfferRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_offer().map_err(map_row_error))
        .collect()
}

#[async_trait]
impl OfferRepository for DieselOfferRepository {
    async fn list(&self) -> Result<Vec<Offer>, OfferRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OfferRow> = offers::table
            .select(OfferRow::as_select())
            .order((offers::created_at.asc(), offers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode_all(rows)
    }

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OfferRow> = offers::table
            .filter(offers::id.eq(id.as_uuid()))
            .select(OfferRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_offer().map_err(map_row_error))
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OfferRow> = offers::table
            .filter(offers::id.eq_any(uuids))
            .select(OfferRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode_all(rows)
    }

    async fn create(&self, draft: &OfferDraft) -> Result<Offer, OfferRepositoryError> {
        let row = NewOfferRow::from_draft(OfferId::random(), draft).map_err(map_row_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let created: OfferRow = diesel::insert_into(offers::table)
            .values(&row)
            .returning(OfferRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        created.into_offer().map_err(map_row_error)
    }

    async fn update(
        &self,
        id: &OfferId,
        patch: &OfferPatch,
    ) -> Result<Option<Offer>, OfferRepositoryError> {
        let changes = OfferUpdate::from_patch(patch, self.clock.utc()).map_err(map_row_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<OfferRow> = diesel::update(offers::table.filter(offers::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(OfferRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        updated
            .map(|row| row.into_offer().map_err(map_row_error))
            .transpose()
    }

    async fn delete(&self, id: &OfferId) -> Result<bool, OfferRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(offers::table.filter(offers::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
