//! Driven port for the external identity service.
//!
//! The provider owns credentials and tokens; this service only ever sees the
//! user id it vouches for.

use async_trait::async_trait;

use crate::domain::{AccessToken, Email, LoginCredentials, Registration, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by identity adapters.
    pub enum IdentityProviderError {
        /// Email and password do not match an account.
        InvalidCredentials => "invalid credentials",
        /// The bearer token is unknown, expired, or malformed.
        InvalidToken => "invalid or expired token",
        /// The provider refused the request, for example a taken email.
        Rejected { message: String } => "identity provider rejected the request: {message}",
        /// The provider could not be reached or answered unexpectedly.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Account created by `sign_up`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    pub user_id: UserId,
    pub email: Email,
}

/// Token issued by `sign_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    pub user_id: UserId,
    pub access_token: AccessToken,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<IdentityAccount, IdentityProviderError>;

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentitySession, IdentityProviderError>;

    /// Verify a bearer token and return the user it belongs to.
    async fn resolve_token(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError>;
}
