//! All-or-nothing settlement over the in-memory tables.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    SettlementPlan, SettlementReceipt, SettlementStore, SettlementStoreError,
};
use crate::domain::{
    AuthenticatedWriteSession, ETicket, Reservation, Transaction, TransactionStatus,
};

use super::{InMemoryBoxOffice, SettlementFault, Tables};

fn injected(step: &str) -> SettlementStoreError {
    SettlementStoreError::query(format!("injected failure at {step}"))
}

impl InMemoryBoxOffice {
    fn apply(
        &self,
        staged: &mut Tables,
        session: &AuthenticatedWriteSession,
        plan: &SettlementPlan,
        fault: Option<SettlementFault>,
    ) -> Result<SettlementReceipt, SettlementStoreError> {
        let now = self.clock.utc();
        // Mirrors the row policy: callers only write their own rows.
        if session.principal().id != plan.transaction.user_id {
            return Err(SettlementStoreError::rejected(
                "transaction owner differs from the requesting user",
            ));
        }

        let mut transaction = Transaction {
            id: plan.transaction.id,
            user_id: plan.transaction.user_id,
            amount: plan.transaction.amount,
            status: TransactionStatus::Pending,
            transaction_key: plan.transaction.transaction_key,
            payment_method: plan.transaction.payment_method,
            created_at: now,
        };
        if staged
            .transactions
            .iter()
            .any(|row| row.transaction_key == transaction.transaction_key)
        {
            return Err(SettlementStoreError::rejected("duplicate transaction key"));
        }
        if fault == Some(SettlementFault::TransactionInsert) {
            return Err(injected("transaction insert"));
        }
        staged.transactions.push(transaction.clone());

        let mut reservations = Vec::with_capacity(plan.reservations.len());
        for draft in &plan.reservations {
            if !staged.offers.iter().any(|offer| offer.id == draft.offer_id) {
                return Err(SettlementStoreError::rejected(format!(
                    "offer {} does not exist",
                    draft.offer_id
                )));
            }
            reservations.push(Reservation {
                id: draft.id,
                user_id: draft.user_id,
                offer_id: draft.offer_id,
                quantity: draft.quantity,
                transaction_id: draft.transaction_id,
                created_at: now,
            });
        }
        if fault == Some(SettlementFault::ReservationInsert) {
            return Err(injected("reservation insert"));
        }
        staged.reservations.extend(reservations.iter().cloned());

        let mut etickets = Vec::with_capacity(plan.etickets.len());
        for draft in &plan.etickets {
            let duplicate = staged
                .etickets
                .iter()
                .chain(etickets.iter())
                .any(|ticket: &ETicket| ticket.scan_reference == draft.scan_reference);
            if duplicate {
                return Err(SettlementStoreError::rejected("duplicate scan reference"));
            }
            etickets.push(ETicket {
                id: draft.id,
                reservation_id: draft.reservation_id,
                scan_reference: draft.scan_reference.clone(),
                is_used: false,
                used_at: None,
                created_at: now,
            });
        }
        if fault == Some(SettlementFault::TicketInsert) {
            return Err(injected("ticket insert"));
        }
        staged.etickets.extend(etickets.iter().cloned());

        transaction.status = transaction
            .status
            .transition(TransactionStatus::Completed)
            .map_err(|err| SettlementStoreError::query(err.to_string()))?;
        if let Some(row) = staged
            .transactions
            .iter_mut()
            .find(|row| row.id == transaction.id)
        {
            row.status = transaction.status;
        }

        Ok(SettlementReceipt {
            transaction,
            reservations,
            etickets,
        })
    }
}

#[async_trait]
impl SettlementStore for InMemoryBoxOffice {
    async fn settle(
        &self,
        session: &AuthenticatedWriteSession,
        plan: &SettlementPlan,
    ) -> Result<SettlementReceipt, SettlementStoreError> {
        let fault = self.current_fault();
        if fault == Some(SettlementFault::Unavailable) {
            return Err(SettlementStoreError::connection("in-memory store offline"));
        }
        let mut tables = self.lock_tables();
        let mut staged = tables.clone();
        let receipt = self.apply(&mut staged, session, plan, fault)?;
        *tables = staged;
        debug!(transaction_id = %receipt.transaction.id, "in-memory settlement committed");
        Ok(receipt)
    }
}
