//! Public catalogue handlers.
//!
//! ```text
//! GET /api/v1/offers
//! GET /api/v1/offers/{id}
//! ```

use actix_web::{get, web};

use crate::domain::{Offer, OfferId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OfferSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// List every offer on sale.
#[utoipa::path(
    get,
    path = "/api/v1/offers",
    responses(
        (status = 200, description = "Offers", body = [OfferSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "listOffers",
    security([])
)]
#[get("/offers")]
pub async fn list_offers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Offer>>> {
    Ok(web::Json(state.offers.list_offers().await?))
}

/// Fetch one offer.
#[utoipa::path(
    get,
    path = "/api/v1/offers/{id}",
    params(("id" = String, Path, description = "Offer identifier")),
    responses(
        (status = 200, description = "Offer", body = OfferSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown offer", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "getOffer",
    security([])
)]
#[get("/offers/{id}")]
pub async fn get_offer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Offer>> {
    let id: OfferId = parse_id(&path, FieldName::new("id"))?;
    Ok(web::Json(state.offers.get_offer(&id).await?))
}
