//! Driving port for admin catalogue management.

use async_trait::async_trait;

use crate::domain::{Error, Offer, OfferDraft, OfferId, OfferPatch, Principal};

/// Admin-only offer mutations. Every call rejects non-admin principals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferAdminCommand: Send + Sync {
    async fn create_offer(&self, principal: &Principal, draft: OfferDraft)
    -> Result<Offer, Error>;

    async fn update_offer(
        &self,
        principal: &Principal,
        id: &OfferId,
        patch: OfferPatch,
    ) -> Result<Offer, Error>;

    async fn delete_offer(&self, principal: &Principal, id: &OfferId) -> Result<(), Error>;
}
