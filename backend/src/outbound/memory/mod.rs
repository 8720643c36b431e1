//! In-memory adapters for fixture mode and integration tests.
//!
//! [`InMemoryBoxOffice`] implements every persistence port over one set of
//! tables guarded by a mutex. Settlement writes into a staged copy and only
//! swaps it in once every step succeeded, so an injected [`SettlementFault`]
//! leaves the tables exactly as they were.

mod offers;
mod reservations;
mod settlement;
mod users;

use std::sync::{Arc, Mutex, MutexGuard};

use mockable::{Clock, DefaultClock};

use crate::domain::{ETicket, Offer, Reservation, Transaction, User};

/// Step at which the next settlements fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementFault {
    /// The store cannot be reached; nothing is attempted.
    Unavailable,
    TransactionInsert,
    ReservationInsert,
    TicketInsert,
}

/// Number of settlement rows currently stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementRowCounts {
    pub transactions: usize,
    pub reservations: usize,
    pub etickets: usize,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    offers: Vec<Offer>,
    transactions: Vec<Transaction>,
    reservations: Vec<Reservation>,
    etickets: Vec<ETicket>,
}

/// Process-local store implementing the offer, user, reservation, and
/// settlement ports.
pub struct InMemoryBoxOffice {
    tables: Mutex<Tables>,
    fault: Mutex<Option<SettlementFault>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryBoxOffice {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryBoxOffice {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            fault: Mutex::new(None),
            clock,
        }
    }

    /// Insert an offer as-is, bypassing admin validation.
    pub fn seed_offer(&self, offer: Offer) {
        self.lock_tables().offers.push(offer);
    }

    /// Insert a profile as-is.
    pub fn seed_user(&self, user: User) {
        self.lock_tables().users.push(user);
    }

    /// Make every following settlement fail at `fault`; `None` clears it.
    pub fn inject_fault(&self, fault: Option<SettlementFault>) {
        *lock(&self.fault) = fault;
    }

    #[must_use]
    pub fn row_counts(&self) -> SettlementRowCounts {
        let tables = self.lock_tables();
        SettlementRowCounts {
            transactions: tables.transactions.len(),
            reservations: tables.reservations.len(),
            etickets: tables.etickets.len(),
        }
    }

    /// Snapshot of the stored transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock_tables().transactions.clone()
    }

    fn lock_tables(&self) -> MutexGuard<'_, Tables> {
        lock(&self.tables)
    }

    fn current_fault(&self) -> Option<SettlementFault> {
        *lock(&self.fault)
    }
}

// A panic while holding the lock cannot leave a half-applied settlement
// because settlement only ever swaps in a complete staged copy.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
