//! PostgreSQL-backed settlement: one checkout, one database transaction.
//!
//! The write sequence is fixed: request claims and a local statement
//! timeout, then the `pending` transaction, the reservations, the tickets,
//! and finally the move to `completed`. Any error rolls everything back.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{
    SettlementPlan, SettlementReceipt, SettlementStore, SettlementStoreError,
};
use crate::domain::{AuthenticatedWriteSession, TransactionStatus};

use super::diesel_error_mapping::{DbFailure, classify_diesel_error, pool_error_message};
use super::models::{
    ETicketRow, NewETicketRow, NewReservationRow, NewTransactionRow, ReservationRow,
    RowDecodeError, TransactionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{e_tickets, reservations, transactions};

/// Statement timeout applied to settlement writes when none is configured.
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel-backed implementation of the [`SettlementStore`] port.
#[derive(Clone)]
pub struct DieselSettlementStore {
    pool: DbPool,
    statement_timeout: Duration,
}

impl DieselSettlementStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }

    /// Override the per-transaction statement timeout.
    #[must_use]
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = timeout;
        self
    }
}

fn map_pool_error(error: PoolError) -> SettlementStoreError {
    SettlementStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SettlementStoreError {
    match classify_diesel_error(error) {
        DbFailure::Connection(message) => SettlementStoreError::connection(message),
        DbFailure::Duplicate(message) | DbFailure::Referenced(message) | DbFailure::Policy(message) => {
            SettlementStoreError::rejected(message)
        }
        DbFailure::Query(message) => SettlementStoreError::query(message),
    }
}

fn map_row_error(error: RowDecodeError) -> SettlementStoreError {
    SettlementStoreError::query(error.to_string())
}

/// JSON claims exposed to row-level security policies for this transaction.
fn request_claims(session: &AuthenticatedWriteSession) -> String {
    json!({
        "sub": session.principal().id.to_string(),
        "role": "authenticated",
        "token_fingerprint": session.token().fingerprint(),
    })
    .to_string()
}

/// Postgres interval literal for `statement_timeout`.
fn timeout_setting(timeout: Duration) -> String {
    format!("{}ms", timeout.as_millis().max(1))
}

/// Rows written by one settlement, prepared before a connection is taken.
struct PlannedRows<'a> {
    transaction: NewTransactionRow<'static>,
    transaction_id: Uuid,
    reservations: Vec<NewReservationRow>,
    etickets: Vec<NewETicketRow<'a>>,
}

impl<'a> PlannedRows<'a> {
    fn from_plan(plan: &'a SettlementPlan) -> Result<Self, RowDecodeError> {
        Ok(Self {
            transaction: NewTransactionRow::from(&plan.transaction),
            transaction_id: *plan.transaction.id.as_uuid(),
            reservations: plan
                .reservations
                .iter()
                .map(NewReservationRow::try_from)
                .collect::<Result<_, _>>()?,
            etickets: plan.etickets.iter().map(NewETicketRow::from).collect(),
        })
    }
}

type WrittenRows = (TransactionRow, Vec<ReservationRow>, Vec<ETicketRow>);

async fn write_rows(
    conn: &mut AsyncPgConnection,
    claims: &str,
    timeout: &str,
    rows: &PlannedRows<'_>,
) -> Result<WrittenRows, diesel::result::Error> {
    diesel::sql_query("SELECT set_config('request.jwt.claims', $1, true)")
        .bind::<Text, _>(claims)
        .execute(conn)
        .await?;
    diesel::sql_query("SELECT set_config('statement_timeout', $1, true)")
        .bind::<Text, _>(timeout)
        .execute(conn)
        .await?;

    diesel::insert_into(transactions::table)
        .values(&rows.transaction)
        .execute(conn)
        .await?;

    let reservation_rows: Vec<ReservationRow> = diesel::insert_into(reservations::table)
        .values(&rows.reservations)
        .returning(ReservationRow::as_returning())
        .get_results(conn)
        .await?;

    let eticket_rows: Vec<ETicketRow> = if rows.etickets.is_empty() {
        Vec::new()
    } else {
        diesel::insert_into(e_tickets::table)
            .values(&rows.etickets)
            .returning(ETicketRow::as_returning())
            .get_results(conn)
            .await?
    };

    let transaction_row: TransactionRow =
        diesel::update(transactions::table.filter(transactions::id.eq(rows.transaction_id)))
            .set(transactions::status.eq(TransactionStatus::Completed.as_str()))
            .returning(TransactionRow::as_returning())
            .get_result(conn)
            .await?;

    Ok((transaction_row, reservation_rows, eticket_rows))
}

fn decode_receipt(
    (transaction, reservations, etickets): WrittenRows,
) -> Result<SettlementReceipt, RowDecodeError> {
    Ok(SettlementReceipt {
        transaction: transaction.into_transaction()?,
        reservations: reservations
            .into_iter()
            .map(ReservationRow::into_reservation)
            .collect::<Result<_, _>>()?,
        etickets: etickets
            .into_iter()
            .map(ETicketRow::into_eticket)
            .collect::<Result<_, _>>()?,
    })
}

#[async_trait]
impl SettlementStore for DieselSettlementStore {
    async fn settle(
        &self,
        session: &AuthenticatedWriteSession,
        plan: &SettlementPlan,
    ) -> Result<SettlementReceipt, SettlementStoreError> {
        let rows = PlannedRows::from_plan(plan).map_err(map_row_error)?;
        let claims = request_claims(session);
        let timeout = timeout_setting(self.statement_timeout);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let written = conn
            .transaction(|conn| {
                async move { write_rows(conn, &claims, &timeout, &rows).await }.scope_boxed()
            })
            .await
            .map_err(|err| {
                let mapped = map_diesel_error(err);
                warn!(
                    transaction_id = %plan.transaction.id,
                    error = %mapped,
                    "settlement rolled back"
                );
                mapped
            })?;

        let receipt = decode_receipt(written).map_err(map_row_error)?;
        debug!(
            transaction_id = %receipt.transaction.id,
            reservations = receipt.reservations.len(),
            etickets = receipt.etickets.len(),
            "settlement committed"
        );
        Ok(receipt)
    }
}
