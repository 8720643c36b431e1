//! Shared wiring for the box office integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the in-memory application and its request helpers live here instead of
//! being copied into every suite.
#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

pub mod database;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error as ActixError, test as actix_test, web};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use url::Url;

use box_office::domain::ports::NoOpCheckoutMetrics;
use box_office::domain::{
    AccountService, CheckoutService, Email, Money, Offer, OfferId, OfferService, PersonName,
    ReservationService, User, UserProfileService,
};
use box_office::inbound::http::api_scope;
use box_office::inbound::http::state::HttpState;
use box_office::outbound::identity::FixtureIdentityProvider;
use box_office::outbound::memory::InMemoryBoxOffice;
use box_office::outbound::tickets::{DEFAULT_QR_BASE_URL, DEFAULT_QR_SIZE, QrCodeReferenceGenerator};

/// Password used for every account the helpers create.
pub const PASSWORD: &str = "correct-horse";

/// In-memory application plus handles on its adapters.
pub struct BoxOfficeWorld {
    pub store: Arc<InMemoryBoxOffice>,
    pub identity: Arc<FixtureIdentityProvider>,
    pub state: HttpState,
}

impl BoxOfficeWorld {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoxOffice::default());
        let identity = Arc::new(FixtureIdentityProvider::default());
        let base = Url::parse(DEFAULT_QR_BASE_URL).expect("default QR base parses");
        let offers = Arc::new(OfferService::new(store.clone()));
        let users = Arc::new(UserProfileService::new(store.clone()));
        let state = HttpState {
            checkout: Arc::new(CheckoutService::new(
                store.clone(),
                store.clone(),
                Arc::new(QrCodeReferenceGenerator::new(base, DEFAULT_QR_SIZE)),
                Arc::new(NoOpCheckoutMetrics),
            )),
            offers: offers.clone(),
            offer_admin: offers,
            reservations: Arc::new(ReservationService::new(store.clone())),
            accounts: Arc::new(AccountService::new(identity.clone(), store.clone())),
            profiles: users.clone(),
            user_admin: users,
        };
        Self {
            store,
            identity,
            state,
        }
    }

    /// Store an offer directly and return its id.
    pub fn seed_offer(&self, name: &str, price: Decimal) -> OfferId {
        let offer = Offer {
            id: OfferId::random(),
            name: name.to_owned(),
            description: format!("{name} for the whole festival"),
            price: Money::new(price).expect("valid price"),
            category: "pass".to_owned(),
            image_url: None,
            max_attendees: 1_000,
            features: vec!["Entry".to_owned()],
            created_at: Utc::now(),
            updated_at: None,
        };
        let id = offer.id;
        self.store.seed_offer(offer);
        id
    }

    /// Create an administrator account that can sign in with [`PASSWORD`].
    pub fn seed_admin(&self, email: &str) {
        let email = Email::new(email).expect("valid email");
        let id = self.identity.with_account(email.clone(), PASSWORD);
        self.store.seed_user(User {
            id,
            email,
            first_name: PersonName::new("first_name", "Ada").expect("valid name"),
            last_name: PersonName::new("last_name", "Admin").expect("valid name"),
            is_admin: true,
            created_at: Utc::now(),
        });
    }
}

/// Build the API service over `world`.
pub async fn init_app(
    world: &BoxOfficeWorld,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = ActixError>
{
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(world.state.clone()))
            .service(api_scope()),
    )
    .await
}

/// Register `email` through the API and return a bearer token for it.
pub async fn register_and_login<S, B>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = ActixError>,
    B: MessageBody,
{
    let registered = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(json!({
                "email": email,
                "password": PASSWORD,
                "first_name": "Grace",
                "last_name": "Hopper",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status().as_u16(), 201, "registration succeeds");
    login(app, email).await
}

/// Sign in with [`PASSWORD`] and return the access token.
pub async fn login<S, B>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = ActixError>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200, "login succeeds");
    let body: Value = actix_test::read_body_json(response).await;
    body.get("access_token")
        .and_then(Value::as_str)
        .expect("access token in login response")
        .to_owned()
}

/// `Authorization` header for `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
