//! User profiles over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::InMemoryBoxOffice;

#[async_trait]
impl UserRepository for InMemoryBoxOffice {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let created_at = self.clock.utc();
        let mut tables = self.lock_tables();
        if tables
            .users
            .iter()
            .any(|row| row.id == user.id || row.email == user.email)
        {
            return Err(UserPersistenceError::duplicate(user.email.as_str()));
        }
        let row = User {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: false,
            created_at,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock_tables()
            .users
            .iter()
            .find(|user| user.id == *id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users = self.lock_tables().users.clone();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut tables = self.lock_tables();
        let Some(user) = tables.users.iter_mut().find(|user| user.id == *id) else {
            return Ok(None);
        };
        if let Some(first_name) = &patch.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(is_admin) = patch.is_admin {
            user.is_admin = is_admin;
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock_tables();
        if tables.transactions.iter().any(|row| row.user_id == *id) {
            return Err(UserPersistenceError::referenced(format!(
                "user {id} has transactions"
            )));
        }
        let before = tables.users.len();
        tables.users.retain(|user| user.id != *id);
        Ok(tables.users.len() != before)
    }
}
