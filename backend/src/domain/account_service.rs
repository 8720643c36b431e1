//! Registration, login, and bearer token verification.
//!
//! The identity provider owns credentials; this service pairs its accounts
//! with local profiles, which carry the admin flag.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, IdentityProvider, IdentityProviderError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, LoginOutcome, NewUser, Principal, Registration, User,
};

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        IdentityProviderError::InvalidToken => Error::unauthorized("invalid or expired token"),
        IdentityProviderError::Rejected { message } => {
            Error::conflict(format!("registration rejected: {message}"))
        }
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => {
            Error::conflict("a user with this email already exists")
        }
        UserPersistenceError::Referenced { .. } => {
            Error::conflict("user has purchases and cannot be deleted")
        }
    }
}

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<I, U> {
    identity: Arc<I>,
    users: Arc<U>,
}

impl<I, U> AccountService<I, U> {
    pub const fn new(identity: Arc<I>, users: Arc<U>) -> Self {
        Self { identity, users }
    }
}

#[async_trait]
impl<I, U> AccountCommand for AccountService<I, U>
where
    I: IdentityProvider,
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let account = self
            .identity
            .sign_up(&registration)
            .await
            .map_err(map_identity_error)?;
        let user = self
            .users
            .insert(&NewUser {
                id: account.user_id,
                email: account.email,
                first_name: registration.first_name().clone(),
                last_name: registration.last_name().clone(),
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let session = self
            .identity
            .sign_in(&credentials)
            .await
            .map_err(map_identity_error)?;
        let user = self
            .users
            .find_by_id(&session.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user profile not found"))?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            access_token: session.access_token,
            user,
        })
    }

    async fn authenticate(&self, token: &AccessToken) -> Result<Principal, Error> {
        let user_id = self
            .identity
            .resolve_token(token)
            .await
            .map_err(map_identity_error)?;
        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(%user_id, "token resolved to an account without a profile");
                Error::unauthorized("invalid or expired token")
            })?;
        Ok(user.principal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        IdentityAccount, IdentitySession, MockIdentityProvider, MockUserRepository,
    };
    use crate::domain::test_fixtures::{principal, user_for};
    use rstest::rstest;

    fn service(
        identity: MockIdentityProvider,
        users: MockUserRepository,
    ) -> AccountService<MockIdentityProvider, MockUserRepository> {
        AccountService::new(Arc::new(identity), Arc::new(users))
    }

    fn registration() -> Registration {
        Registration::try_from_parts("ada@example.com", "secret1", "Ada", "Lovelace")
            .expect("valid registration")
    }

    #[tokio::test]
    async fn register_creates_profile_for_identity_account() {
        let expected = user_for(&principal(false));
        let account = IdentityAccount {
            user_id: expected.id,
            email: expected.email.clone(),
        };
        let stored = expected.clone();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_up()
            .times(1)
            .return_once(move |_| Ok(account));
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|new_user| {
                new_user.first_name.as_str() == "Ada" && new_user.last_name.as_str() == "Lovelace"
            })
            .times(1)
            .return_once(move |_| Ok(stored));

        let user = service(identity, users)
            .register(registration())
            .await
            .expect("registration succeeds");

        assert_eq!(user, expected);
    }

    #[rstest]
    #[case(IdentityProviderError::rejected("email taken"), ErrorCode::Conflict)]
    #[case(IdentityProviderError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
    #[tokio::test]
    async fn register_maps_identity_failures(
        #[case] failure: IdentityProviderError,
        #[case] expected: ErrorCode,
    ) {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_up().return_once(move |_| Err(failure));
        let mut users = MockUserRepository::new();
        users.expect_insert().never();

        let err = service(identity, users)
            .register(registration())
            .await
            .expect_err("registration fails");

        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn login_returns_token_and_profile() {
        let user = user_for(&principal(false));
        let user_id = user.id;
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_in().return_once(move |_| {
            Ok(IdentitySession {
                user_id,
                access_token: AccessToken::new("issued").expect("valid token"),
            })
        });
        let stored = user.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        let credentials =
            LoginCredentials::try_from_parts("ada@example.com", "secret1").expect("credentials");

        let outcome = service(identity, users)
            .login(credentials)
            .await
            .expect("login succeeds");

        assert_eq!(outcome.access_token.expose(), "issued");
        assert_eq!(outcome.user, user);
    }

    #[tokio::test]
    async fn login_with_bad_password_is_unauthorized() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .return_once(|_| Err(IdentityProviderError::invalid_credentials()));
        let credentials =
            LoginCredentials::try_from_parts("ada@example.com", "wrong").expect("credentials");

        let err = service(identity, MockUserRepository::new())
            .login(credentials)
            .await
            .expect_err("login fails");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case::admin(true)]
    #[case::customer(false)]
    #[tokio::test]
    async fn authenticate_builds_principal_from_profile(#[case] is_admin: bool) {
        let expected = principal(is_admin);
        let user = user_for(&expected);
        let user_id = user.id;
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_resolve_token()
            .return_once(move |_| Ok(user_id));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(move |_| Ok(Some(user)));

        let resolved = service(identity, users)
            .authenticate(&AccessToken::new("tok").expect("token"))
            .await
            .expect("token resolves");

        assert_eq!(resolved, expected);
    }

    #[rstest]
    #[case::bad_token(Err(IdentityProviderError::invalid_token()), None)]
    #[case::no_profile(Ok(()), Some(None))]
    #[tokio::test]
    async fn authenticate_rejects_unknown_callers(
        #[case] resolution: Result<(), IdentityProviderError>,
        #[case] profile: Option<Option<User>>,
    ) {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_resolve_token()
            .return_once(move |_| resolution.map(|()| crate::domain::UserId::random()));
        let mut users = MockUserRepository::new();
        match profile {
            Some(found) => {
                users.expect_find_by_id().return_once(move |_| Ok(found));
            }
            None => {
                users.expect_find_by_id().never();
            }
        }

        let err = service(identity, users)
            .authenticate(&AccessToken::new("tok").expect("token"))
            .await
            .expect_err("caller rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
