//! Cart pricing against the live catalogue.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::ports::{OfferRepository, OfferRepositoryError};
use crate::domain::{Money, Offer, OfferId};

use super::cart::Cart;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// At least one requested offer does not exist. Which one is not reported.
    #[error("one or more offers do not exist")]
    UnknownOffers { requested: usize, found: usize },
    #[error("order total exceeds the supported amount")]
    Overflow,
    #[error(transparent)]
    Catalog(#[from] OfferRepositoryError),
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub offer: Offer,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Cart with current unit prices and an exact total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    lines: Vec<PricedLine>,
    total: Money,
}

impl PricedCart {
    /// Lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }
}

/// Prices carts through the catalog reader.
#[derive(Clone)]
pub struct CartPricer<R> {
    offers: Arc<R>,
}

impl<R> CartPricer<R> {
    pub const fn new(offers: Arc<R>) -> Self {
        Self { offers }
    }
}

impl<R> CartPricer<R>
where
    R: OfferRepository,
{
    /// Resolve every line with one batch lookup and total the cart.
    ///
    /// # Errors
    /// [`PricingError::UnknownOffers`] when the catalogue returns fewer
    /// offers than requested, [`PricingError::Overflow`] when the total does
    /// not fit, and [`PricingError::Catalog`] for lookup failures.
    pub async fn price(&self, cart: &Cart) -> Result<PricedCart, PricingError> {
        let requested = cart.offer_ids();
        let offers = self.offers.find_by_ids(&requested).await?;
        if offers.len() < requested.len() {
            return Err(PricingError::UnknownOffers {
                requested: requested.len(),
                found: offers.len(),
            });
        }

        let mut by_id: HashMap<OfferId, Offer> =
            offers.into_iter().map(|offer| (offer.id, offer)).collect();
        let mut total = Money::zero();
        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let offer = by_id
                .remove(&line.offer_id())
                .ok_or(PricingError::UnknownOffers {
                    requested: requested.len(),
                    found: lines.len(),
                })?;
            let subtotal = offer
                .price
                .checked_times(line.quantity())
                .ok_or(PricingError::Overflow)?;
            total = total.checked_add(subtotal).ok_or(PricingError::Overflow)?;
            lines.push(PricedLine {
                offer,
                quantity: line.quantity(),
                subtotal,
            });
        }

        Ok(PricedCart { lines, total })
    }
}
