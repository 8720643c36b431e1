//! Offer catalogue over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{OfferRepository, OfferRepositoryError};
use crate::domain::{Offer, OfferDraft, OfferId, OfferPatch};

use super::InMemoryBoxOffice;

#[async_trait]
impl OfferRepository for InMemoryBoxOffice {
    async fn list(&self) -> Result<Vec<Offer>, OfferRepositoryError> {
        let mut offers = self.lock_tables().offers.clone();
        offers.sort_by_key(|offer| offer.created_at);
        Ok(offers)
    }

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferRepositoryError> {
        Ok(self
            .lock_tables()
            .offers
            .iter()
            .find(|offer| offer.id == *id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferRepositoryError> {
        Ok(self
            .lock_tables()
            .offers
            .iter()
            .filter(|offer| ids.contains(&offer.id))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &OfferDraft) -> Result<Offer, OfferRepositoryError> {
        let offer = Offer {
            id: OfferId::random(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            category: draft.category.clone(),
            image_url: draft.image_url.clone(),
            max_attendees: draft.max_attendees,
            features: draft.features.clone(),
            created_at: self.clock.utc(),
            updated_at: None,
        };
        self.lock_tables().offers.push(offer.clone());
        Ok(offer)
    }

    async fn update(
        &self,
        id: &OfferId,
        patch: &OfferPatch,
    ) -> Result<Option<Offer>, OfferRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock_tables();
        let Some(offer) = tables.offers.iter_mut().find(|offer| offer.id == *id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            offer.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            offer.description.clone_from(description);
        }
        if let Some(price) = patch.price {
            offer.price = price;
        }
        if let Some(category) = &patch.category {
            offer.category.clone_from(category);
        }
        if let Some(image_url) = &patch.image_url {
            offer.image_url = Some(image_url.clone());
        }
        if let Some(max_attendees) = patch.max_attendees {
            offer.max_attendees = max_attendees;
        }
        if let Some(features) = &patch.features {
            offer.features.clone_from(features);
        }
        offer.updated_at = Some(now);
        Ok(Some(offer.clone()))
    }

    async fn delete(&self, id: &OfferId) -> Result<bool, OfferRepositoryError> {
        let mut tables = self.lock_tables();
        if tables.reservations.iter().any(|row| row.offer_id == *id) {
            return Err(OfferRepositoryError::referenced(format!(
                "offer {id} has reservations"
            )));
        }
        let before = tables.offers.len();
        tables.offers.retain(|offer| offer.id != *id);
        Ok(tables.offers.len() != before)
    }
}
