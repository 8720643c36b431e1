//! Account and profile handlers.
//!
//! ```text
//! POST /api/v1/users/register {"email":"ada@example.com","password":"…","first_name":"Ada","last_name":"Lovelace"}
//! POST /api/v1/users/login {"email":"ada@example.com","password":"…"}
//! GET /api/v1/users/me
//! GET /api/v1/users/profile
//! PUT /api/v1/users/profile {"first_name":"Augusta"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, PersonName, Registration, User, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    empty_update_error, map_auth_validation_error, map_user_validation_error,
};

/// Request body for `POST /api/v1/users/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.email,
            &value.password,
            &value.first_name,
            &value.last_name,
        )
        .map_err(map_auth_validation_error)
    }
}

/// Request body for `POST /api/v1/users/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password).map_err(map_auth_validation_error)
    }
}

/// Successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`.
    #[schema(example = "bearer")]
    pub token_type: String,
    #[schema(value_type = UserSchema)]
    pub user_profile: User,
}

/// Request body for `PUT /api/v1/users/profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validate optional name fields into a patch without the admin flag.
pub(crate) fn names_patch(
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<UserPatch, Error> {
    let name = |field: &'static str, raw: Option<&str>| {
        raw.map(|raw| PersonName::new(field, raw))
            .transpose()
            .map_err(map_user_validation_error)
    };
    Ok(UserPatch {
        first_name: name("first_name", first_name)?,
        last_name: name("last_name", last_name)?,
        is_admin: None,
    })
}

/// Create an account with the identity service and its profile.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Identity service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.accounts.register(registration).await?;
    info!(user_id = %user.id, "user registered");
    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let outcome = state.accounts.login(credentials).await?;
    Ok(web::Json(LoginResponse {
        access_token: outcome.access_token.expose().to_owned(),
        token_type: "bearer".to_owned(),
        user_profile: outcome.user,
    }))
}

/// The authenticated caller's user record.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Profile missing", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("bearer" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.profiles.get_profile(user.principal()).await?))
}

/// The caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile", body = UserSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Profile missing", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("bearer" = []))
)]
#[get("/users/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.profiles.get_profile(user.principal()).await?))
}

/// Change the caller's names. Absent fields are left untouched.
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserSchema),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("bearer" = []))
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let body = payload.into_inner();
    let patch = names_patch(body.first_name.as_deref(), body.last_name.as_deref())?;
    if patch.is_empty() {
        return Err(empty_update_error());
    }
    let updated = state
        .profiles
        .update_profile(user.principal(), patch)
        .await?;
    Ok(web::Json(updated))
}
