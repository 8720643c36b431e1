//! Checkout HTTP handler.
//!
//! ```text
//! POST /api/v1/checkout {"items":[{"offer_id":"<uuid>","quantity":2}]}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::CartLineDraft;
use crate::domain::ports::CheckoutRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, SettledReservationSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// One requested cart line.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckoutItemRequest {
    #[schema(format = Uuid)]
    pub offer_id: String,
    /// Must be positive; validated by the checkout service.
    #[schema(example = 2)]
    pub quantity: i64,
}

/// Request body for `POST /api/v1/checkout`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckoutBody {
    pub items: Vec<CheckoutItemRequest>,
}

fn parse_items(items: Vec<CheckoutItemRequest>) -> ApiResult<Vec<CartLineDraft>> {
    items
        .into_iter()
        .map(|item| {
            Ok(CartLineDraft {
                offer_id: parse_id(&item.offer_id, FieldName::new("offer_id"))?,
                quantity: item.quantity,
            })
        })
        .collect()
}

/// Buy tickets for every line of the cart in one settlement.
///
/// Either every reservation and ticket is written and the call answers 201,
/// or nothing is written.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutBody,
    responses(
        (status = 201, description = "Reservations with their offer and tickets", body = [SettledReservationSchema]),
        (status = 400, description = "Invalid cart", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Unknown offer", body = ErrorSchema),
        (status = 500, description = "Settlement failed; nothing was committed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["checkout"],
    operation_id = "checkout",
    security(("bearer" = []))
)]
#[post("/checkout")]
pub async fn checkout(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CheckoutBody>,
) -> ApiResult<HttpResponse> {
    let items = parse_items(payload.into_inner().items)?;
    let response = state
        .checkout
        .checkout(CheckoutRequest {
            session: user.into_session(),
            items,
        })
        .await?;
    info!(
        transaction_id = %response.transaction.id,
        tickets = response.ticket_count(),
        "checkout completed"
    );
    Ok(HttpResponse::Created().json(response.reservations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CheckoutResponse, SettledReservation};
    use crate::domain::test_fixtures::{fixed_time, offer_priced, principal};
    use crate::domain::{
        ETicket, ETicketId, Error, Money, OfferId, PaymentMethod, Principal, Reservation,
        ReservationId, ScanReference, Transaction, TransactionId, TransactionKey,
        TransactionStatus,
    };
    use crate::inbound::http::test_utils::{MockPorts, bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    fn response_for(buyer: &Principal, quantity: u32) -> CheckoutResponse {
        let offer = offer_priced("Weekend Pass", dec!(50.00));
        let transaction = Transaction {
            id: TransactionId::random(),
            user_id: buyer.id,
            amount: Money::new(dec!(100.00)).expect("valid amount"),
            status: TransactionStatus::Completed,
            transaction_key: TransactionKey::generate(),
            payment_method: PaymentMethod::Card,
            created_at: fixed_time(),
        };
        let reservation = Reservation {
            id: ReservationId::random(),
            user_id: buyer.id,
            offer_id: offer.id,
            quantity,
            transaction_id: transaction.id,
            created_at: fixed_time(),
        };
        let e_tickets = (0..quantity)
            .map(|n| ETicket {
                id: ETicketId::random(),
                reservation_id: reservation.id,
                scan_reference: ScanReference::new(format!("https://qr.example.test/?data={n}"))
                    .expect("valid reference"),
                is_used: false,
                used_at: None,
                created_at: fixed_time(),
            })
            .collect();
        CheckoutResponse {
            transaction,
            reservations: vec![SettledReservation {
                reservation,
                offer,
                e_tickets,
            }],
        }
    }

    async fn post_checkout(ports: MockPorts, body: Value) -> actix_web::dev::ServiceResponse {
        let app =
            actix_test::init_service(App::new().app_data(ports.into_data()).service(
                web::scope("/api/v1").service(checkout),
            ))
            .await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/checkout")
                .insert_header(bearer())
                .set_json(body)
                .to_request(),
        )
        .await
    }

    #[actix_web::test]
    async fn created_response_lists_reservations_with_tickets() {
        let buyer = principal(false);
        let response = response_for(&buyer, 2);
        let offer_id = OfferId::random();
        let mut ports = MockPorts::default();
        ports.authenticate_as(buyer.clone());
        ports
            .checkout
            .expect_checkout()
            .withf(move |request| {
                request.session.principal().id == buyer.id
                    && request.items
                        == vec![CartLineDraft {
                            offer_id,
                            quantity: 2,
                        }]
            })
            .times(1)
            .return_once(move |_| Ok(response));

        let res = post_checkout(
            ports,
            json!({ "items": [{ "offer_id": offer_id.to_string(), "quantity": 2 }] }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        let reservations = body.as_array().expect("array body");
        assert_eq!(reservations.len(), 1);
        let first = &reservations[0];
        assert_eq!(first.get("quantity").and_then(Value::as_u64), Some(2));
        assert_eq!(
            first.pointer("/offer/price").and_then(Value::as_str),
            Some("50.00")
        );
        let tickets = first
            .get("e_tickets")
            .and_then(Value::as_array)
            .expect("tickets listed");
        assert_eq!(tickets.len(), 2);
        assert!(tickets[0].get("qr_code_url").is_some());
    }

    #[actix_web::test]
    async fn malformed_offer_id_is_rejected_before_checkout() {
        let mut ports = MockPorts::default();
        ports.authenticate_as(principal(false));
        ports.checkout.expect_checkout().never();

        let res = post_checkout(
            ports,
            json!({ "items": [{ "offer_id": "not-a-uuid", "quantity": 1 }] }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.pointer("/details/field").and_then(Value::as_str),
            Some("offer_id")
        );
    }

    #[actix_web::test]
    async fn settlement_failures_surface_as_server_errors() {
        let mut ports = MockPorts::default();
        ports.authenticate_as(principal(false));
        ports.checkout.expect_checkout().return_once(|_| {
            Err(Error::settlement_failed("checkout could not be completed")
                .with_details(json!({ "committed": false })))
        });

        let res = post_checkout(
            ports,
            json!({ "items": [{ "offer_id": OfferId::random().to_string(), "quantity": 1 }] }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("settlement_failed")
        );
        assert_eq!(
            body.pointer("/details/committed").and_then(Value::as_bool),
            Some(false)
        );
    }

    #[actix_web::test]
    async fn anonymous_checkout_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports.checkout.expect_checkout().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_data())
                .service(web::scope("/api/v1").service(checkout)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/checkout")
                .set_json(json!({ "items": [] }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
