//! PostgreSQL-backed `VerificationTokenRepository` using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VerificationTokenRepository, VerificationTokenRepositoryError};
use crate::domain::{VerificationToken, VerificationTokenParams};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::VerificationTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::verification_tokens;

/// Diesel-backed implementation of the [`VerificationTokenRepository`] port.
#[derive(Clone)]
pub struct DieselVerificationTokenRepository {
    pool: DbPool,
}

impl DieselVerificationTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VerificationTokenRepositoryError {
    VerificationTokenRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> VerificationTokenRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => VerificationTokenRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            VerificationTokenRepositoryError::conflict(constraint)
        }
        DieselFailure::Query(message) | DieselFailure::ForeignKeyViolation(message) => {
            VerificationTokenRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl VerificationTokenRepository for DieselVerificationTokenRepository {
    async fn create(
        &self,
        token: &VerificationToken,
    ) -> Result<VerificationToken, VerificationTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = diesel::insert_into(verification_tokens::table)
            .values(VerificationTokenRow::from(token))
            .returning(VerificationTokenRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn take(
        &self,
        params: &VerificationTokenParams,
    ) -> Result<Option<VerificationToken>, VerificationTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // DELETE .. RETURNING keeps lookup and deletion in one statement so a
        // token cannot be redeemed twice.
        let removed = diesel::delete(
            verification_tokens::table
                .filter(verification_tokens::identifier.eq(&params.identifier))
                .filter(verification_tokens::token.eq(&params.token)),
        )
        .returning(VerificationTokenRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(removed.map(Into::into))
    }
}
