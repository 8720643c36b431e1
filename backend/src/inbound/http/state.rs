//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, CheckoutCommand, OfferAdminCommand, OfferQuery, ProfileCommand,
    ReservationQuery, UserAdminCommand,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use box_office::domain::ports::NoOpCheckoutMetrics;
/// use box_office::domain::{
///     AccountService, CheckoutService, OfferService, ReservationService, UserProfileService,
/// };
/// use box_office::inbound::http::state::HttpState;
/// use box_office::outbound::identity::FixtureIdentityProvider;
/// use box_office::outbound::memory::InMemoryBoxOffice;
/// use box_office::outbound::tickets::{DEFAULT_QR_SIZE, QrCodeReferenceGenerator};
///
/// let store = Arc::new(InMemoryBoxOffice::default());
/// let offers = Arc::new(OfferService::new(store.clone()));
/// let users = Arc::new(UserProfileService::new(store.clone()));
/// let base = url::Url::parse("https://qr.example.test/").expect("valid url");
/// let state = HttpState {
///     checkout: Arc::new(CheckoutService::new(
///         store.clone(),
///         store.clone(),
///         Arc::new(QrCodeReferenceGenerator::new(base, DEFAULT_QR_SIZE)),
///         Arc::new(NoOpCheckoutMetrics),
///     )),
///     offers: offers.clone(),
///     offer_admin: offers,
///     reservations: Arc::new(ReservationService::new(store.clone())),
///     accounts: Arc::new(AccountService::new(
///         Arc::new(FixtureIdentityProvider::default()),
///         store,
///     )),
///     profiles: users.clone(),
///     user_admin: users,
/// };
/// let _offers = state.offers.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub checkout: Arc<dyn CheckoutCommand>,
    pub offers: Arc<dyn OfferQuery>,
    pub offer_admin: Arc<dyn OfferAdminCommand>,
    pub reservations: Arc<dyn ReservationQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn ProfileCommand>,
    pub user_admin: Arc<dyn UserAdminCommand>,
}
