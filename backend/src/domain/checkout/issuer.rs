//! Expands reservations into individual tickets.

use std::sync::Arc;

use crate::domain::ports::ScanReferenceGenerator;
use crate::domain::{ETicketId, NewETicket, ReservationId};

/// Creates ticket drafts with fresh scan references.
#[derive(Clone)]
pub struct TicketIssuer<G> {
    references: Arc<G>,
}

impl<G> TicketIssuer<G> {
    pub const fn new(references: Arc<G>) -> Self {
        Self { references }
    }
}

impl<G> TicketIssuer<G>
where
    G: ScanReferenceGenerator,
{
    /// Exactly `quantity` drafts for `reservation_id`; none for zero.
    #[must_use]
    pub fn issue(&self, reservation_id: ReservationId, quantity: u32) -> Vec<NewETicket> {
        (0..quantity)
            .map(|_| NewETicket {
                id: ETicketId::random(),
                reservation_id,
                scan_reference: self.references.next_reference(),
            })
            .collect()
    }
}
