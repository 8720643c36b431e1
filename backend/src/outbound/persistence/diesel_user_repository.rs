//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Profiles are keyed by the identity provider's user id; e-mail uniqueness
//! is enforced by the `users_email_key` constraint and surfaces as
//! [`UserPersistenceError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::diesel_error_mapping::{DbFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, RowDecodeError, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DbFailure::Connection(message) => UserPersistenceError::connection(message),
        DbFailure::Duplicate(message) => UserPersistenceError::duplicate(message),
        DbFailure::Referenced(message) => UserPersistenceError::referenced(message),
        DbFailure::Policy(message) | DbFailure::Query(message) => {
            UserPersistenceError::query(message)
        }
    }
}

fn map_row_error(error: RowDecodeError) -> UserPersistenceError {
    UserPersistenceError::query(error.to_string())
}

impl DieselUserRepository {
    async fn load(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_user().map_err(map_row_error))
            .transpose()
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_user().map_err(map_row_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.load(id).await
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row.into_user().map_err(map_row_error))
            .collect()
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        // Diesel refuses an empty changeset.
        if patch.is_empty() {
            return self.load(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&UserUpdate::from(patch))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_user().map_err(map_row_error))
            .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_checkout_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("pool exhausted"));
        assert_eq!(err, UserPersistenceError::connection("pool exhausted"));
    }

    #[rstest]
    fn pool_build_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::build("bad url"));
        assert_eq!(err, UserPersistenceError::connection("bad url"));
    }

    #[rstest]
    fn query_builder_errors_are_query_errors() {
        let err = map_diesel_error(diesel::result::Error::QueryBuilderError(
            "no changes".into(),
        ));
        assert_eq!(err, UserPersistenceError::query("database query error"));
    }
}
