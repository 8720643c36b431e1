//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod error;
pub mod health;
pub mod offers;
pub mod reservations;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, json_error_handler};

use actix_web::{Scope, web};

/// Every REST endpoint under `/api/v1`, with JSON decoding failures
/// reported through the standard error payload.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use box_office::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(checkout::checkout)
        .service(offers::list_offers)
        .service(offers::get_offer)
        .service(reservations::list_reservations)
        .service(reservations::get_eticket)
        .service(users::register)
        .service(users::login)
        .service(users::current_user)
        .service(users::get_profile)
        .service(users::update_profile)
        .service(admin::create_offer)
        .service(admin::update_offer)
        .service(admin::delete_offer)
        .service(admin::list_users)
        .service(admin::get_user)
        .service(admin::update_user)
        .service(admin::delete_user)
}
