//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::web;

use crate::domain::Principal;
use crate::domain::ports::{
    MockAccountCommand, MockCheckoutCommand, MockOfferAdminCommand, MockOfferQuery,
    MockProfileCommand, MockReservationQuery, MockUserAdminCommand,
};

use super::state::HttpState;

/// Bearer token presented by test requests.
pub const TEST_TOKEN: &str = "test-token";

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

/// One mock per driving port.
///
/// Set expectations on the fields, then turn the bundle into handler state.
/// Mocks without expectations panic when called, so an unexpected port call
/// fails the test.
#[derive(Default)]
pub struct MockPorts {
    pub checkout: MockCheckoutCommand,
    pub offers: MockOfferQuery,
    pub offer_admin: MockOfferAdminCommand,
    pub reservations: MockReservationQuery,
    pub accounts: MockAccountCommand,
    pub profiles: MockProfileCommand,
    pub user_admin: MockUserAdminCommand,
}

impl MockPorts {
    /// Accept [`TEST_TOKEN`] as `principal` for any number of requests.
    pub fn authenticate_as(&mut self, principal: Principal) -> &mut Self {
        self.accounts
            .expect_authenticate()
            .withf(|token| token.expose() == TEST_TOKEN)
            .returning(move |_| Ok(principal.clone()));
        self
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            checkout: Arc::new(self.checkout),
            offers: Arc::new(self.offers),
            offer_admin: Arc::new(self.offer_admin),
            reservations: Arc::new(self.reservations),
            accounts: Arc::new(self.accounts),
            profiles: Arc::new(self.profiles),
            user_admin: Arc::new(self.user_admin),
        }
    }

    pub fn into_data(self) -> web::Data<HttpState> {
        web::Data::new(self.into_state())
    }
}
