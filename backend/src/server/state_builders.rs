//! Wiring of domain services onto concrete adapters.
//!
//! Two layouts exist: fixture mode keeps everything in process, database
//! mode uses the Diesel adapters and the GoTrue identity service.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::{Clock, DefaultClock};
use tracing::info;
use url::Url;

use box_office::domain::ports::{
    CheckoutCommand, CheckoutMetrics, OfferRepository, ScanReferenceGenerator, SettlementStore,
};
use box_office::domain::{
    AccountService, CheckoutService, Email, OfferService, PersonName, ReservationService, User,
    UserProfileService,
};
use box_office::inbound::http::state::HttpState;
use box_office::outbound::identity::{FixtureIdentityProvider, GoTrueIdentityProvider};
use box_office::outbound::memory::InMemoryBoxOffice;
use box_office::outbound::persistence::{
    DbPool, DieselOfferRepository, DieselReservationRepository, DieselSettlementStore,
    DieselUserRepository,
};
use box_office::outbound::tickets::QrCodeReferenceGenerator;
use box_office::settings::BoxOfficeSettings;

fn reference_generator(settings: &BoxOfficeSettings) -> Result<Arc<QrCodeReferenceGenerator>> {
    let base = Url::parse(settings.qr_base_url())
        .wrap_err_with(|| format!("invalid QR base URL {}", settings.qr_base_url()))?;
    Ok(Arc::new(QrCodeReferenceGenerator::new(base, settings.qr_size())))
}

fn checkout_service<O, S, G, M>(
    offers: Arc<O>,
    store: Arc<S>,
    references: Arc<G>,
    metrics: Arc<M>,
) -> Arc<dyn CheckoutCommand>
where
    O: OfferRepository + 'static,
    S: SettlementStore + 'static,
    G: ScanReferenceGenerator + 'static,
    M: CheckoutMetrics + 'static,
{
    Arc::new(CheckoutService::new(offers, store, references, metrics))
}

/// Build handler state over the in-memory store and fixture identity.
///
/// When both fixture admin settings are present an admin account is created
/// so the catalogue can be populated through the API.
pub(crate) fn build_fixture_state<M>(
    settings: &BoxOfficeSettings,
    metrics: Arc<M>,
) -> Result<HttpState>
where
    M: CheckoutMetrics + 'static,
{
    let store = Arc::new(InMemoryBoxOffice::default());
    let identity = Arc::new(FixtureIdentityProvider::default());

    if let (Some(email), Some(password)) = (
        settings.fixture_admin_email.as_deref(),
        settings.fixture_admin_password.as_deref(),
    ) {
        seed_fixture_admin(&store, &identity, email, password)?;
    }

    let offers = Arc::new(OfferService::new(store.clone()));
    let users = Arc::new(UserProfileService::new(store.clone()));
    Ok(HttpState {
        checkout: checkout_service(
            store.clone(),
            store.clone(),
            reference_generator(settings)?,
            metrics,
        ),
        offers: offers.clone(),
        offer_admin: offers,
        reservations: Arc::new(ReservationService::new(store.clone())),
        accounts: Arc::new(AccountService::new(identity, store)),
        profiles: users.clone(),
        user_admin: users,
    })
}

fn seed_fixture_admin(
    store: &InMemoryBoxOffice,
    identity: &FixtureIdentityProvider,
    email: &str,
    password: &str,
) -> Result<()> {
    let email = Email::new(email).map_err(|err| eyre!("invalid fixture admin email: {err}"))?;
    let id = identity.with_account(email.clone(), password);
    let name = |field: &'static str, value: &str| {
        PersonName::new(field, value).map_err(|err| eyre!("invalid fixture admin name: {err}"))
    };
    store.seed_user(User {
        id,
        email,
        first_name: name("first_name", "Fixture")?,
        last_name: name("last_name", "Admin")?,
        is_admin: true,
        created_at: DefaultClock.utc(),
    });
    info!(user_id = %id, "fixture admin account created");
    Ok(())
}

/// Build handler state over PostgreSQL and the GoTrue identity service.
pub(crate) fn build_database_state<M>(
    settings: &BoxOfficeSettings,
    pool: &DbPool,
    metrics: Arc<M>,
) -> Result<HttpState>
where
    M: CheckoutMetrics + 'static,
{
    let identity_url = settings
        .identity_url
        .as_deref()
        .ok_or_else(|| eyre!("BOX_OFFICE_IDENTITY_URL must be set outside fixture mode"))?;
    let identity_url =
        Url::parse(identity_url).wrap_err("BOX_OFFICE_IDENTITY_URL is not a valid URL")?;
    let identity = GoTrueIdentityProvider::new(
        identity_url,
        settings.identity_api_key.clone().unwrap_or_default(),
        settings.identity_timeout(),
    )
    .wrap_err("failed to build identity client")?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let offer_repository = Arc::new(DieselOfferRepository::new(pool.clone(), clock));
    let user_repository = Arc::new(DieselUserRepository::new(pool.clone()));
    let store = Arc::new(
        DieselSettlementStore::new(pool.clone())
            .with_statement_timeout(settings.statement_timeout()),
    );

    let offers = Arc::new(OfferService::new(offer_repository.clone()));
    let users = Arc::new(UserProfileService::new(user_repository.clone()));
    Ok(HttpState {
        checkout: checkout_service(
            offer_repository,
            store,
            reference_generator(settings)?,
            metrics,
        ),
        offers: offers.clone(),
        offer_admin: offers,
        reservations: Arc::new(ReservationService::new(Arc::new(
            DieselReservationRepository::new(pool.clone()),
        ))),
        accounts: Arc::new(AccountService::new(Arc::new(identity), user_repository)),
        profiles: users.clone(),
        user_admin: users,
    })
}
