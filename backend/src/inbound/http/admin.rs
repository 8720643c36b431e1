//! Admin catalogue and user management handlers.
//!
//! Every route requires a bearer token of an admin principal; the domain
//! services reject everyone else with 403.
//!
//! ```text
//! POST   /api/v1/admin/offers
//! PUT    /api/v1/admin/offers/{id}
//! DELETE /api/v1/admin/offers/{id}
//! GET    /api/v1/admin/users
//! GET    /api/v1/admin/users/{id}
//! PUT    /api/v1/admin/users/{id}
//! DELETE /api/v1/admin/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Offer, OfferDraft, OfferDraftParts, OfferId, OfferPatch, OfferPatchParts, User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, OfferSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::names_patch;
use crate::inbound::http::validation::{
    FieldName, empty_update_error, map_offer_validation_error, parse_id,
};

/// Request body for `POST /api/v1/admin/offers`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOfferRequest {
    #[schema(example = "Weekend Pass")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, example = "50.00")]
    pub price: Decimal,
    #[serde(rename = "type")]
    #[schema(example = "pass")]
    pub category: String,
    pub image_url: Option<String>,
    #[schema(example = 500)]
    pub max_attendees: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl TryFrom<CreateOfferRequest> for OfferDraft {
    type Error = crate::domain::Error;

    fn try_from(value: CreateOfferRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(OfferDraftParts {
            name: value.name,
            description: value.description,
            price: value.price,
            category: value.category,
            image_url: value.image_url,
            max_attendees: value.max_attendees,
            features: value.features,
        })
        .map_err(map_offer_validation_error)
    }
}

/// Request body for `PUT /api/v1/admin/offers/{id}`. Absent fields keep
/// their current value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateOfferRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "45.00")]
    pub price: Option<Decimal>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub max_attendees: Option<u32>,
    pub features: Option<Vec<String>>,
}

impl TryFrom<UpdateOfferRequest> for OfferPatch {
    type Error = crate::domain::Error;

    fn try_from(value: UpdateOfferRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(OfferPatchParts {
            name: value.name,
            description: value.description,
            price: value.price,
            category: value.category,
            image_url: value.image_url,
            max_attendees: value.max_attendees,
            features: value.features,
        })
        .map_err(map_offer_validation_error)
    }
}

/// Request body for `PUT /api/v1/admin/users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
}

/// Add an offer to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/admin/offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer created", body = OfferSchema),
        (status = 400, description = "Invalid offer", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createOffer",
    security(("bearer" = []))
)]
#[post("/admin/offers")]
pub async fn create_offer(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateOfferRequest>,
) -> ApiResult<HttpResponse> {
    let draft = OfferDraft::try_from(payload.into_inner())?;
    let offer = state.offer_admin.create_offer(user.principal(), draft).await?;
    info!(offer_id = %offer.id, "offer created");
    Ok(HttpResponse::Created().json(offer))
}

/// Change some fields of an offer.
#[utoipa::path(
    put,
    path = "/api/v1/admin/offers/{id}",
    params(("id" = String, Path, description = "Offer identifier")),
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "Updated offer", body = OfferSchema),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown offer", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateOffer",
    security(("bearer" = []))
)]
#[put("/admin/offers/{id}")]
pub async fn update_offer(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateOfferRequest>,
) -> ApiResult<web::Json<Offer>> {
    let id: OfferId = parse_id(&path, FieldName::new("id"))?;
    let patch = OfferPatch::try_from(payload.into_inner())?;
    let offer = state
        .offer_admin
        .update_offer(user.principal(), &id, patch)
        .await?;
    Ok(web::Json(offer))
}

/// Remove an offer that has never been sold.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/offers/{id}",
    params(("id" = String, Path, description = "Offer identifier")),
    responses(
        (status = 204, description = "Offer deleted"),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown offer", body = ErrorSchema),
        (status = 409, description = "Offer has reservations", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteOffer",
    security(("bearer" = []))
)]
#[delete("/admin/offers/{id}")]
pub async fn delete_offer(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: OfferId = parse_id(&path, FieldName::new("id"))?;
    state.offer_admin.delete_offer(user.principal(), &id).await?;
    info!(offer_id = %id, "offer deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listUsers",
    security(("bearer" = []))
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.user_admin.list_users(user.principal()).await?))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "getUser",
    security(("bearer" = []))
)]
#[get("/admin/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_id(&path, FieldName::new("id"))?;
    Ok(web::Json(
        state.user_admin.get_user(user.principal(), &id).await?,
    ))
}

/// Change a user's names or admin flag.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateUser",
    security(("bearer" = []))
)]
#[put("/admin/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_id(&path, FieldName::new("id"))?;
    let body = payload.into_inner();
    let mut patch = names_patch(body.first_name.as_deref(), body.last_name.as_deref())?;
    patch.is_admin = body.is_admin;
    if patch.is_empty() {
        return Err(empty_update_error());
    }
    let updated = state
        .user_admin
        .update_user(user.principal(), &id, patch)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a user without purchases.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "User has purchases", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteUser",
    security(("bearer" = []))
)]
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, FieldName::new("id"))?;
    state.user_admin.delete_user(user.principal(), &id).await?;
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
