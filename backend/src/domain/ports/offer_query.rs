//! Driving port for public catalogue reads.

use async_trait::async_trait;

use crate::domain::{Error, Offer, OfferId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferQuery: Send + Sync {
    async fn list_offers(&self) -> Result<Vec<Offer>, Error>;

    /// `not_found` when the offer does not exist.
    async fn get_offer(&self, id: &OfferId) -> Result<Offer, Error>;
}
