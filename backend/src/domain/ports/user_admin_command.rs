//! Driving port for admin user management.

use async_trait::async_trait;

use crate::domain::{Error, Principal, User, UserId, UserPatch};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    async fn list_users(&self, principal: &Principal) -> Result<Vec<User>, Error>;

    async fn get_user(&self, principal: &Principal, id: &UserId) -> Result<User, Error>;

    async fn update_user(
        &self,
        principal: &Principal,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<User, Error>;

    async fn delete_user(&self, principal: &Principal, id: &UserId) -> Result<(), Error>;
}
