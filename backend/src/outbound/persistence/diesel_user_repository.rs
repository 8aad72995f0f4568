//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, ProviderAccountRef, User, UserId, UserUpdate};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, RowDecodeError, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => UserRepositoryError::conflict(constraint),
        DieselFailure::Query(message) | DieselFailure::ForeignKeyViolation(message) => {
            UserRepositoryError::query(message)
        }
    }
}

fn decode(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(|err: RowDecodeError| UserRepositoryError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(decode)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(decode)
            .transpose()
    }

    async fn find_by_account(
        &self,
        account: &ProviderAccountRef,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .inner_join(users::table)
            .filter(accounts::provider.eq(&account.provider))
            .filter(accounts::provider_account_id.eq(&account.provider_account_id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(decode)
            .transpose()
    }

    async fn update(&self, update: &UserUpdate) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserChangeset {
            name: update.name.as_deref(),
            email: update.email.as_ref().map(AsRef::as_ref),
            email_verified: update.email_verified,
            image: update.image.as_deref(),
        };
        diesel::update(users::table.find(*update.id.as_uuid()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(decode)
            .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
