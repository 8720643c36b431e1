//! Driving port for a user's own profile.

use async_trait::async_trait;

use crate::domain::{Error, Principal, User, UserPatch};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    async fn get_profile(&self, principal: &Principal) -> Result<User, Error>;

    /// Update names. The admin flag in `patch` is ignored; an update that
    /// changes nothing is `invalid_request`.
    async fn update_profile(&self, principal: &Principal, patch: UserPatch) -> Result<User, Error>;
}
