//! Purchase history and ticket handlers.
//!
//! ```text
//! GET /api/v1/reservations
//! GET /api/v1/etickets/{id}
//! ```

use actix_web::{get, web};

use crate::domain::{ETicket, ETicketId, ReservationWithOffer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ETicketSchema, ErrorSchema, ReservationSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// The caller's reservations, newest first, each with its offer.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    responses(
        (status = 200, description = "Reservations", body = [ReservationSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "listReservations",
    security(("bearer" = []))
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ReservationWithOffer>>> {
    let reservations = state
        .reservations
        .list_reservations(user.principal())
        .await?;
    Ok(web::Json(reservations))
}

/// One ticket. Only its owner or an admin may read it.
#[utoipa::path(
    get,
    path = "/api/v1/etickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket", body = ETicketSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "Ticket belongs to another user", body = ErrorSchema),
        (status = 404, description = "Unknown ticket", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "getETicket",
    security(("bearer" = []))
)]
#[get("/etickets/{id}")]
pub async fn get_eticket(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ETicket>> {
    let id: ETicketId = parse_id(&path, FieldName::new("id"))?;
    let ticket = state.reservations.get_eticket(user.principal(), &id).await?;
    Ok(web::Json(ticket))
}
