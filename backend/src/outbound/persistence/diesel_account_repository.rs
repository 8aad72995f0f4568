//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, ProviderAccountRef};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::NewAccountRow;
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => AccountRepositoryError::conflict(constraint),
        DieselFailure::ForeignKeyViolation(_) => AccountRepositoryError::unknown_user(),
        DieselFailure::Query(message) => AccountRepositoryError::query(message),
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn link(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAccountRow {
            id: Uuid::new_v4(),
            user_id: *account.user_id.as_uuid(),
            account_type: &account.account_type,
            provider: &account.provider,
            provider_account_id: &account.provider_account_id,
            refresh_token: account.refresh_token.as_deref(),
            access_token: account.access_token.as_deref(),
            expires_at: account.expires_at,
            token_type: account.token_type.as_deref(),
            scope: account.scope.as_deref(),
            id_token: account.id_token.as_deref(),
            session_state: account.session_state.as_deref(),
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn unlink(&self, account: &ProviderAccountRef) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            accounts::table
                .filter(accounts::provider.eq(&account.provider))
                .filter(accounts::provider_account_id.eq(&account.provider_account_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
