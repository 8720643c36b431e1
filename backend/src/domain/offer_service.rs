//! Offer catalogue services: public reads and admin management.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{OfferAdminCommand, OfferQuery, OfferRepository, OfferRepositoryError};
use crate::domain::{Error, Offer, OfferDraft, OfferId, OfferPatch, Principal, require_admin};

fn map_repository_error(error: OfferRepositoryError) -> Error {
    match error {
        OfferRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("offer repository unavailable: {message}"))
        }
        OfferRepositoryError::Query { message } => {
            Error::internal(format!("offer repository error: {message}"))
        }
        OfferRepositoryError::Referenced { .. } => {
            Error::conflict("offer has reservations and cannot be deleted")
        }
    }
}

fn offer_not_found(id: &OfferId) -> Error {
    Error::not_found(format!("offer {id} not found"))
}

/// Offer service implementing the catalogue driving ports.
#[derive(Clone)]
pub struct OfferService<R> {
    offers: Arc<R>,
}

impl<R> OfferService<R> {
    pub const fn new(offers: Arc<R>) -> Self {
        Self { offers }
    }
}

#[async_trait]
impl<R> OfferQuery for OfferService<R>
where
    R: OfferRepository,
{
    async fn list_offers(&self) -> Result<Vec<Offer>, Error> {
        self.offers.list().await.map_err(map_repository_error)
    }

    async fn get_offer(&self, id: &OfferId) -> Result<Offer, Error> {
        self.offers
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| offer_not_found(id))
    }
}

#[async_trait]
impl<R> OfferAdminCommand for OfferService<R>
where
    R: OfferRepository,
{
    async fn create_offer(&self, principal: &Principal, draft: OfferDraft) -> Result<Offer, Error> {
        require_admin(principal)?;
        let offer = self
            .offers
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(offer_id = %offer.id, admin_id = %principal.id, "offer created");
        Ok(offer)
    }

    async fn update_offer(
        &self,
        principal: &Principal,
        id: &OfferId,
        patch: OfferPatch,
    ) -> Result<Offer, Error> {
        require_admin(principal)?;
        if patch.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        let offer = self
            .offers
            .update(id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| offer_not_found(id))?;
        info!(offer_id = %id, admin_id = %principal.id, "offer updated");
        Ok(offer)
    }

    async fn delete_offer(&self, principal: &Principal, id: &OfferId) -> Result<(), Error> {
        require_admin(principal)?;
        let deleted = self.offers.delete(id).await.map_err(map_repository_error)?;
        if !deleted {
            return Err(offer_not_found(id));
        }
        info!(offer_id = %id, admin_id = %principal.id, "offer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockOfferRepository;
    use crate::domain::test_fixtures::{offer_priced, principal};
    use crate::domain::{Money, OfferPatch};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn service(repo: MockOfferRepository) -> OfferService<MockOfferRepository> {
        OfferService::new(Arc::new(repo))
    }

    fn price_patch() -> OfferPatch {
        OfferPatch {
            price: Some(Money::new(dec!(75.00)).expect("valid price")),
            ..OfferPatch::default()
        }
    }

    #[tokio::test]
    async fn get_offer_maps_missing_to_not_found() {
        let mut repo = MockOfferRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let err = service(repo)
            .get_offer(&OfferId::random())
            .await
            .expect_err("missing offer");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(OfferRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(OfferRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_repository_errors(
        #[case] failure: OfferRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockOfferRepository::new();
        repo.expect_list().return_once(move || Err(failure));

        let err = service(repo).list_offers().await.expect_err("failure");

        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn non_admin_cannot_mutate_offers() {
        let mut repo = MockOfferRepository::new();
        repo.expect_update().never();
        repo.expect_delete().never();
        let offers = service(repo);
        let caller = principal(false);

        let update = offers
            .update_offer(&caller, &OfferId::random(), price_patch())
            .await
            .expect_err("forbidden");
        let delete = offers
            .delete_offer(&caller, &OfferId::random())
            .await
            .expect_err("forbidden");

        assert_eq!(update.code(), ErrorCode::Forbidden);
        assert_eq!(delete.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn empty_update_is_invalid() {
        let mut repo = MockOfferRepository::new();
        repo.expect_update().never();

        let err = service(repo)
            .update_offer(&principal(true), &OfferId::random(), OfferPatch::default())
            .await
            .expect_err("empty patch");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn admin_updates_existing_offer() {
        let offer = offer_priced("Pass", dec!(75.00));
        let expected = offer.clone();
        let mut repo = MockOfferRepository::new();
        repo.expect_update()
            .times(1)
            .return_once(move |_, _| Ok(Some(offer)));

        let updated = service(repo)
            .update_offer(&principal(true), &expected.id, price_patch())
            .await
            .expect("update succeeds");

        assert_eq!(updated, expected);
    }

    #[rstest]
    #[case(Ok(false), ErrorCode::NotFound)]
    #[case(Err(OfferRepositoryError::referenced("reservations_offer_id_fkey")), ErrorCode::Conflict)]
    #[tokio::test]
    async fn delete_failures_are_mapped(
        #[case] outcome: Result<bool, OfferRepositoryError>,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockOfferRepository::new();
        repo.expect_delete().return_once(move |_| outcome);

        let err = service(repo)
            .delete_offer(&principal(true), &OfferId::random())
            .await
            .expect_err("delete fails");

        assert_eq!(err.code(), expected);
    }
}
