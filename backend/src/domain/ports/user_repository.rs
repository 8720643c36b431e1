//! Port abstraction for user profile persistence.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A profile with the same id or email already exists.
        Duplicate { message: String } => "user already exists: {message}",
        /// The user owns purchases and cannot be removed.
        Referenced { message: String } => "user is still referenced: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// All profiles ordered by creation time.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Apply `patch`; `None` when the user does not exist.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove the profile; `false` when it did not exist.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
