//! Profile self-service and admin user management.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::account_service::map_user_error;
use crate::domain::ports::{ProfileCommand, UserAdminCommand, UserRepository};
use crate::domain::{Error, Principal, User, UserId, UserPatch, require_admin};

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing [`ProfileCommand`] and [`UserAdminCommand`].
#[derive(Clone)]
pub struct UserProfileService<U> {
    users: Arc<U>,
}

impl<U> UserProfileService<U> {
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> UserProfileService<U>
where
    U: UserRepository,
{
    async fn find(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn apply(&self, id: &UserId, patch: &UserPatch) -> Result<User, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        self.users
            .update(id, patch)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<U> ProfileCommand for UserProfileService<U>
where
    U: UserRepository,
{
    async fn get_profile(&self, principal: &Principal) -> Result<User, Error> {
        self.find(&principal.id).await
    }

    async fn update_profile(&self, principal: &Principal, patch: UserPatch) -> Result<User, Error> {
        self.apply(&principal.id, &patch.without_admin_flag()).await
    }
}

#[async_trait]
impl<U> UserAdminCommand for UserProfileService<U>
where
    U: UserRepository,
{
    async fn list_users(&self, principal: &Principal) -> Result<Vec<User>, Error> {
        require_admin(principal)?;
        self.users.list().await.map_err(map_user_error)
    }

    async fn get_user(&self, principal: &Principal, id: &UserId) -> Result<User, Error> {
        require_admin(principal)?;
        self.find(id).await
    }

    async fn update_user(
        &self,
        principal: &Principal,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<User, Error> {
        require_admin(principal)?;
        let user = self.apply(id, &patch).await?;
        info!(user_id = %id, admin_id = %principal.id, is_admin = user.is_admin, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, principal: &Principal, id: &UserId) -> Result<(), Error> {
        require_admin(principal)?;
        if !self.users.delete(id).await.map_err(map_user_error)? {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, admin_id = %principal.id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::PersonName;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::domain::test_fixtures::{principal, user_for};

    fn service(users: MockUserRepository) -> UserProfileService<MockUserRepository> {
        UserProfileService::new(Arc::new(users))
    }

    #[tokio::test]
    async fn profile_update_cannot_grant_admin() {
        let caller = principal(false);
        let updated = user_for(&caller);
        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(|_, patch| patch.is_admin.is_none() && patch.first_name.is_some())
            .times(1)
            .return_once(move |_, _| Ok(Some(updated)));
        let patch = UserPatch {
            first_name: Some(PersonName::new("first_name", "Augusta").expect("name")),
            is_admin: Some(true),
            ..UserPatch::default()
        };

        let user = service(users)
            .update_profile(&caller, patch)
            .await
            .expect("update succeeds");

        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn admin_flag_only_patch_is_empty_for_profiles() {
        let mut users = MockUserRepository::new();
        users.expect_update().never();
        let patch = UserPatch {
            is_admin: Some(true),
            ..UserPatch::default()
        };

        let err = service(users)
            .update_profile(&principal(false), patch)
            .await
            .expect_err("empty after stripping admin flag");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn admin_can_promote_users() {
        let target = principal(false);
        let mut promoted = user_for(&target);
        promoted.is_admin = true;
        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(|_, patch| patch.is_admin == Some(true))
            .return_once(move |_, _| Ok(Some(promoted)));
        let patch = UserPatch {
            is_admin: Some(true),
            ..UserPatch::default()
        };

        let user = service(users)
            .update_user(&principal(true), &target.id, patch)
            .await
            .expect("promotion succeeds");

        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn admin_operations_require_admin() {
        let mut users = MockUserRepository::new();
        users.expect_list().never();
        users.expect_delete().never();
        let users = service(users);
        let caller = principal(false);

        let list = users.list_users(&caller).await.expect_err("forbidden");
        let delete = users
            .delete_user(&caller, &UserId::random())
            .await
            .expect_err("forbidden");

        assert_eq!(list.code(), ErrorCode::Forbidden);
        assert_eq!(delete.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn missing_users_are_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        users.expect_delete().return_once(|_| Ok(false));
        let users = service(users);
        let admin = principal(true);

        let get = users
            .get_user(&admin, &UserId::random())
            .await
            .expect_err("missing");
        let delete = users
            .delete_user(&admin, &UserId::random())
            .await
            .expect_err("missing");

        assert_eq!(get.code(), ErrorCode::NotFound);
        assert_eq!(delete.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn users_with_purchases_cannot_be_deleted() {
        let mut users = MockUserRepository::new();
        users.expect_delete().return_once(|_| {
            Err(UserPersistenceError::referenced("transactions_user_id_fkey"))
        });

        let err = service(users)
            .delete_user(&principal(true), &UserId::random())
            .await
            .expect_err("referenced user");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
