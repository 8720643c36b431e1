//! Driven port for the offer catalogue.
//!
//! Besides the admin CRUD surface this is the catalog reader used by checkout
//! pricing: `find_by_ids` resolves a whole cart in one round trip.

use async_trait::async_trait;

use crate::domain::{Offer, OfferDraft, OfferId, OfferPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by offer repository adapters.
    pub enum OfferRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "offer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "offer repository query failed: {message}",
        /// The offer is referenced by reservations and cannot be removed.
        Referenced { message: String } => "offer is still referenced: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// All offers, oldest first.
    async fn list(&self) -> Result<Vec<Offer>, OfferRepositoryError>;

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferRepositoryError>;

    /// Batch lookup. Unknown ids are silently absent from the result.
    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferRepositoryError>;

    async fn create(&self, draft: &OfferDraft) -> Result<Offer, OfferRepositoryError>;

    /// Apply `patch`; `None` when the offer does not exist.
    async fn update(
        &self,
        id: &OfferId,
        patch: &OfferPatch,
    ) -> Result<Option<Offer>, OfferRepositoryError>;

    /// Remove the offer; `false` when it did not exist.
    async fn delete(&self, id: &OfferId) -> Result<bool, OfferRepositoryError>;
}
