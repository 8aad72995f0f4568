//! PostgreSQL-backed `FeedbackVoteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::FeedbackVote;
use crate::domain::ports::{FeedbackVoteRepository, FeedbackVoteRepositoryError};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::NewFeedbackVoteRow;
use super::pool::{DbPool, PoolError};
use super::schema::feedback_votes;

/// Diesel-backed implementation of the [`FeedbackVoteRepository`] port.
#[derive(Clone)]
pub struct DieselFeedbackVoteRepository {
    pool: DbPool,
}

impl DieselFeedbackVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedbackVoteRepositoryError {
    FeedbackVoteRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FeedbackVoteRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => FeedbackVoteRepositoryError::connection(message),
        DieselFailure::UniqueViolation(_) => FeedbackVoteRepositoryError::already_voted(),
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            FeedbackVoteRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl FeedbackVoteRepository for DieselFeedbackVoteRepository {
    async fn add(&self, vote: &FeedbackVote) -> Result<(), FeedbackVoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(feedback_votes::table)
            .values(NewFeedbackVoteRow {
                post_id: *vote.post_id.as_uuid(),
                user_id: *vote.user_id.as_uuid(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_means_already_voted() {
        #[derive(Debug)]
        struct Duplicate;

        impl diesel::result::DatabaseErrorInformation for Duplicate {
            fn message(&self) -> &str {
                "duplicate key value violates unique constraint \"feedback_votes_pkey\""
            }
            fn details(&self) -> Option<&str> {
                None
            }
            fn hint(&self) -> Option<&str> {
                None
            }
            fn table_name(&self) -> Option<&str> {
                Some("feedback_votes")
            }
            fn column_name(&self) -> Option<&str> {
                None
            }
            fn constraint_name(&self) -> Option<&str> {
                Some("feedback_votes_pkey")
            }
            fn statement_position(&self) -> Option<i32> {
                None
            }
        }

        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new(Duplicate),
        );
        assert_eq!(
            map_diesel_error(error),
            FeedbackVoteRepositoryError::already_voted()
        );
    }
}
