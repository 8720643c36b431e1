//! Driven port for writing a whole checkout as one unit of work.
//!
//! Implementations must be all-or-nothing: when `settle` returns an error no
//! transaction, reservation, or ticket row from the plan may remain visible.
//! The transaction is written as `pending` and only becomes `completed` once
//! every reservation and ticket is in place.

use async_trait::async_trait;

use crate::domain::{
    AuthenticatedWriteSession, ETicket, NewETicket, NewReservation, NewTransaction, Reservation,
    Transaction,
};

use super::define_port_error;

define_port_error! {
    /// Settlement failures. Every variant means nothing was committed.
    pub enum SettlementStoreError {
        /// The store could not be reached or a connection was lost.
        Connection { message: String } => "settlement store connection failed: {message}",
        /// A write was refused, for example by a constraint or row policy.
        Rejected { message: String } => "settlement write rejected: {message}",
        /// A statement failed for another reason.
        Query { message: String } => "settlement query failed: {message}",
    }
}

/// Everything one checkout writes, with identifiers assigned up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    pub transaction: NewTransaction,
    pub reservations: Vec<NewReservation>,
    pub etickets: Vec<NewETicket>,
}

/// Rows as committed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub transaction: Transaction,
    pub reservations: Vec<Reservation>,
    pub etickets: Vec<ETicket>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Write `plan` atomically on behalf of the session's principal.
    async fn settle(
        &self,
        session: &AuthenticatedWriteSession,
        plan: &SettlementPlan,
    ) -> Result<SettlementReceipt, SettlementStoreError>;
}
