//! Driving port for registration, login, and bearer token verification.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, LoginOutcome, Principal, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create the identity account and its profile.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;

    /// Resolve a bearer token to the principal making the request.
    ///
    /// Invalid tokens and tokens without a profile are `unauthorized`.
    async fn authenticate(&self, token: &AccessToken) -> Result<Principal, Error>;
}
