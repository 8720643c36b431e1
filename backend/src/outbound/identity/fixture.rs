//! Process-local identity provider for fixture mode and tests.
//!
//! Accounts and issued tokens live in memory. Passwords are compared as
//! given; this adapter must never front real users.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    IdentityAccount, IdentityProvider, IdentityProviderError, IdentitySession,
};
use crate::domain::{AccessToken, Email, LoginCredentials, Registration, UserId};

struct FixtureAccount {
    user_id: UserId,
    password: Zeroizing<String>,
}

#[derive(Default)]
struct FixtureDirectory {
    accounts: HashMap<Email, FixtureAccount>,
    tokens: HashMap<String, UserId>,
}

/// In-memory [`IdentityProvider`].
#[derive(Default)]
pub struct FixtureIdentityProvider {
    directory: Mutex<FixtureDirectory>,
}

impl FixtureIdentityProvider {
    /// Register an account directly, returning its id.
    pub fn with_account(&self, email: Email, password: &str) -> UserId {
        let user_id = UserId::random();
        self.directory().accounts.insert(
            email,
            FixtureAccount {
                user_id,
                password: Zeroizing::new(password.to_owned()),
            },
        );
        user_id
    }

    /// Issue a token for `user_id` without a password check.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the token cannot be
    /// wrapped.
    pub fn issue_token(&self, user_id: UserId) -> Result<AccessToken, IdentityProviderError> {
        let raw = format!("fixture-{}", Uuid::new_v4());
        let token = AccessToken::new(raw.clone())
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;
        self.directory().tokens.insert(raw, user_id);
        Ok(token)
    }

    fn directory(&self) -> MutexGuard<'_, FixtureDirectory> {
        self.directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<IdentityAccount, IdentityProviderError> {
        let credentials = registration.credentials();
        let email = credentials.email().clone();
        let mut directory = self.directory();
        if directory.accounts.contains_key(&email) {
            return Err(IdentityProviderError::rejected("email already registered"));
        }
        let user_id = UserId::random();
        directory.accounts.insert(
            email.clone(),
            FixtureAccount {
                user_id,
                password: Zeroizing::new(credentials.password().to_owned()),
            },
        );
        Ok(IdentityAccount { user_id, email })
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentitySession, IdentityProviderError> {
        let user_id = {
            let directory = self.directory();
            let account = directory
                .accounts
                .get(credentials.email())
                .filter(|account| account.password.as_str() == credentials.password())
                .ok_or_else(IdentityProviderError::invalid_credentials)?;
            account.user_id
        };
        Ok(IdentitySession {
            user_id,
            access_token: self.issue_token(user_id)?,
        })
    }

    async fn resolve_token(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        self.directory()
            .tokens
            .get(token.expose())
            .copied()
            .ok_or_else(IdentityProviderError::invalid_token)
    }
}
