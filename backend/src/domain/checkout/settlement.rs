//! Checkout coordination.
//!
//! The coordinator validates and prices the cart, plans every row the
//! checkout will create, and hands the plan to the settlement store as one
//! atomic call. The receipt is checked against the plan before anything is
//! reported back, so a `201` always means every ticket exists.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CheckoutCommand, CheckoutMetrics, CheckoutOutcome, CheckoutRequest, CheckoutResponse,
    OfferRepository, OfferRepositoryError, ScanReferenceGenerator, SettledReservation,
    SettlementPlan, SettlementReceipt, SettlementStore, SettlementStoreError,
};
use crate::domain::{
    AuthenticatedWriteSession, Cart, Error, ErrorCode, NewReservation, NewTransaction,
    PaymentMethod, ReservationId, TransactionId, TransactionKey, TransactionStatus,
};

use super::issuer::TicketIssuer;
use super::pricing::{CartPricer, PricedCart, PricingError};

fn map_pricing_error(error: PricingError) -> Error {
    match error {
        PricingError::UnknownOffers { .. } => Error::not_found(error.to_string()),
        PricingError::Overflow => Error::invalid_request(error.to_string()),
        PricingError::Catalog(OfferRepositoryError::Connection { message }) => {
            Error::service_unavailable(format!("offer catalogue unavailable: {message}"))
        }
        PricingError::Catalog(other) => Error::internal(format!("offer catalogue error: {other}")),
    }
}

fn map_settlement_error(error: SettlementStoreError) -> Error {
    let details = json!({ "committed": false });
    match error {
        SettlementStoreError::Connection { .. } => {
            Error::service_unavailable("ticket store unavailable; nothing was committed")
                .with_details(details)
        }
        SettlementStoreError::Rejected { .. } | SettlementStoreError::Query { .. } => {
            Error::settlement_failed("checkout could not be completed; nothing was committed")
                .with_details(details)
        }
    }
}

/// Receipt inconsistent with the plan after commit.
fn unconfirmed_settlement(transaction_id: TransactionId, reason: &str) -> Error {
    error!(%transaction_id, reason, "settlement receipt does not match plan");
    Error::settlement_failed(
        "checkout was recorded but could not be confirmed; contact support with the transaction id",
    )
    .with_details(json!({
        "committed": true,
        "transaction_id": transaction_id,
    }))
}

const fn outcome_for(result: &Result<CheckoutResponse, Error>) -> CheckoutOutcome {
    match result {
        Ok(_) => CheckoutOutcome::Completed,
        Err(err) => match err.code() {
            ErrorCode::InvalidRequest | ErrorCode::NotFound => CheckoutOutcome::Rejected,
            _ => CheckoutOutcome::Failed,
        },
    }
}

/// Checkout service implementing [`CheckoutCommand`].
#[derive(Clone)]
pub struct CheckoutService<O, S, G, M> {
    pricer: CartPricer<O>,
    issuer: TicketIssuer<G>,
    store: Arc<S>,
    metrics: Arc<M>,
}

impl<O, S, G, M> CheckoutService<O, S, G, M> {
    pub const fn new(offers: Arc<O>, store: Arc<S>, references: Arc<G>, metrics: Arc<M>) -> Self {
        Self {
            pricer: CartPricer::new(offers),
            issuer: TicketIssuer::new(references),
            store,
            metrics,
        }
    }
}

impl<O, S, G, M> CheckoutService<O, S, G, M>
where
    O: OfferRepository,
    S: SettlementStore,
    G: ScanReferenceGenerator,
    M: CheckoutMetrics,
{
    fn plan(&self, session: &AuthenticatedWriteSession, priced: &PricedCart) -> SettlementPlan {
        let user_id = session.principal().id;
        let transaction = NewTransaction {
            id: TransactionId::random(),
            user_id,
            amount: priced.total(),
            transaction_key: TransactionKey::generate(),
            payment_method: PaymentMethod::Card,
        };

        let mut reservations = Vec::with_capacity(priced.lines().len());
        let mut etickets = Vec::new();
        for line in priced.lines() {
            let reservation = NewReservation {
                id: ReservationId::random(),
                user_id,
                offer_id: line.offer.id,
                quantity: line.quantity,
                transaction_id: transaction.id,
            };
            etickets.extend(self.issuer.issue(reservation.id, line.quantity));
            reservations.push(reservation);
        }

        SettlementPlan {
            transaction,
            reservations,
            etickets,
        }
    }

    /// Pair committed rows with priced lines, matching back by offer id.
    fn confirm(
        priced: PricedCart,
        plan: &SettlementPlan,
        receipt: SettlementReceipt,
    ) -> Result<CheckoutResponse, Error> {
        let SettlementReceipt {
            transaction,
            reservations,
            etickets,
        } = receipt;
        if transaction.id != plan.transaction.id
            || transaction.status != TransactionStatus::Completed
            || transaction.amount != priced.total()
        {
            return Err(unconfirmed_settlement(
                plan.transaction.id,
                "transaction row differs from plan",
            ));
        }
        if reservations.len() != priced.lines().len() || etickets.len() != plan.etickets.len() {
            return Err(unconfirmed_settlement(
                transaction.id,
                "row counts differ from plan",
            ));
        }

        let mut settled = Vec::with_capacity(reservations.len());
        for line in priced.lines() {
            let Some(reservation) = reservations
                .iter()
                .find(|reservation| reservation.offer_id == line.offer.id)
            else {
                return Err(unconfirmed_settlement(
                    transaction.id,
                    "reservation missing for offer",
                ));
            };
            let e_tickets: Vec<_> = etickets
                .iter()
                .filter(|ticket| ticket.reservation_id == reservation.id)
                .cloned()
                .collect();
            if reservation.quantity != line.quantity || e_tickets.len() != line.quantity as usize {
                return Err(unconfirmed_settlement(
                    transaction.id,
                    "ticket count differs from reservation quantity",
                ));
            }
            settled.push(SettledReservation {
                reservation: reservation.clone(),
                offer: line.offer.clone(),
                e_tickets,
            });
        }

        Ok(CheckoutResponse {
            transaction,
            reservations: settled,
        })
    }

    async fn settle(&self, request: CheckoutRequest) -> Result<CheckoutResponse, Error> {
        let CheckoutRequest { session, items } = request;
        let cart = Cart::try_from_drafts(items).map_err(|err| {
            let error = Error::invalid_request(format!("invalid cart: {err}"));
            match err.line_index() {
                Some(index) => error.with_details(json!({ "item": index })),
                None => error,
            }
        })?;
        let priced = self.pricer.price(&cart).await.map_err(map_pricing_error)?;
        let plan = self.plan(&session, &priced);

        let receipt = self
            .store
            .settle(&session, &plan)
            .await
            .map_err(|err| {
                error!(
                    transaction_id = %plan.transaction.id,
                    user_id = %session.principal().id,
                    error = %err,
                    "settlement rolled back"
                );
                map_settlement_error(err)
            })?;

        let response = Self::confirm(priced, &plan, receipt)?;
        info!(
            transaction_id = %response.transaction.id,
            user_id = %response.transaction.user_id,
            amount = %response.transaction.amount,
            reservations = response.reservations.len(),
            tickets = response.ticket_count(),
            "checkout settled"
        );
        Ok(response)
    }
}

#[async_trait]
impl<O, S, G, M> CheckoutCommand for CheckoutService<O, S, G, M>
where
    O: OfferRepository,
    S: SettlementStore,
    G: ScanReferenceGenerator,
    M: CheckoutMetrics,
{
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutResponse, Error> {
        let result = self.settle(request).await;
        if let Err(err) = self.metrics.record(outcome_for(&result)).await {
            warn!(error = %err, "failed to record checkout outcome");
        }
        result
    }
}

#[cfg(test)]
#[path = "settlement_tests.rs"]
mod tests;
