//! Credentials, bearer tokens, and the per-request write session.
//!
//! Secrets are wrapped in [`Zeroizing`] so they are wiped on drop, and their
//! `Debug` output never contains the raw value.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::{Email, PersonName, Principal, User, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    #[error(transparent)]
    User(#[from] UserValidationError),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("bearer token must not be empty")]
    EmptyToken,
}

/// Login request values.
///
/// ## Invariants
/// - `email` is normalised by [`Email::new`].
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use box_office::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "hunter22").unwrap();
/// assert_eq!(creds.email().as_str(), "ada@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up request: credentials plus the profile names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    first_name: PersonName,
    last_name: PersonName,
}

impl Registration {
    pub fn try_from_parts(
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, AuthValidationError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            credentials,
            first_name: PersonName::new("first_name", first_name)?,
            last_name: PersonName::new("last_name", last_name)?,
        })
    }

    #[must_use]
    pub const fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }
}

/// Opaque bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AuthValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Raw token for forwarding to the identity provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Hex SHA-256 of the token, safe to log or hand to the store.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}

/// Successful login: the token to present on later requests plus the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: AccessToken,
    pub user: User,
}

/// Request-scoped write context for settlement.
///
/// Built by the inbound adapter from the verified bearer token and passed
/// down explicitly. Adapters use it to scope store-side row security to the
/// requesting user. It is never stored on shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedWriteSession {
    principal: Principal,
    token: AccessToken,
}

impl AuthenticatedWriteSession {
    #[must_use]
    pub const fn new(principal: Principal, token: AccessToken) -> Self {
        Self { principal, token }
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }
}
