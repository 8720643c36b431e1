//! Bearer authentication for HTTP handlers.
//!
//! [`AuthenticatedUser`] is an extractor: it reads `Authorization: Bearer`,
//! asks the account port to resolve the token, and hands handlers an
//! [`AuthenticatedWriteSession`] so the credential can travel down to the
//! settlement store without any ambient state.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, AuthenticatedWriteSession, Error, Principal};

use super::state::HttpState;

/// Authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(AuthenticatedWriteSession);

impl AuthenticatedUser {
    #[must_use]
    pub const fn principal(&self) -> &Principal {
        self.0.principal()
    }

    #[must_use]
    pub fn into_session(self) -> AuthenticatedWriteSession {
        self.0
    }
}

/// Token from an `Authorization` header value.
fn parse_bearer(value: Option<&str>) -> Result<AccessToken, Error> {
    let value = value.ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    AccessToken::new(token.trim()).map_err(|_| Error::unauthorized("missing bearer token"))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        // Non-UTF-8 header values are treated like a missing header.
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned).unwrap_or_default());
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = parse_bearer(header.as_deref())?;
            let principal = state.accounts.authenticate(&token).await?;
            Ok(Self(AuthenticatedWriteSession::new(principal, token)))
        })
    }
}
