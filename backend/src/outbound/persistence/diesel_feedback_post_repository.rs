//! PostgreSQL-backed `FeedbackPostRepository` implementation using Diesel ORM.
//!
//! Post creation and vote recounting each run inside a single transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{FeedbackPostRepository, FeedbackPostRepositoryError};
use crate::domain::{FeedbackPost, FeedbackPostId, FeedbackStatus, NewFeedbackPost};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{FeedbackPostRow, NewFeedbackVoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{feedback_posts, feedback_votes};

/// Diesel-backed implementation of the [`FeedbackPostRepository`] port.
#[derive(Clone)]
pub struct DieselFeedbackPostRepository {
    pool: DbPool,
}

impl DieselFeedbackPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedbackPostRepositoryError {
    FeedbackPostRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FeedbackPostRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => FeedbackPostRepositoryError::connection(message),
        DieselFailure::ForeignKeyViolation(_) => FeedbackPostRepositoryError::unknown_author(),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            FeedbackPostRepositoryError::query(message)
        }
    }
}

fn decode(row: FeedbackPostRow) -> Result<FeedbackPost, FeedbackPostRepositoryError> {
    FeedbackPost::try_from(row).map_err(|err| FeedbackPostRepositoryError::query(err.to_string()))
}

#[async_trait]
impl FeedbackPostRepository for DieselFeedbackPostRepository {
    async fn find_by_id(
        &self,
        id: &FeedbackPostId,
    ) -> Result<Option<FeedbackPost>, FeedbackPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        feedback_posts::table
            .find(*id.as_uuid())
            .select(FeedbackPostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(decode)
            .transpose()
    }

    async fn create_with_self_vote(
        &self,
        post: &NewFeedbackPost,
    ) -> Result<FeedbackPost, FeedbackPostRepositoryError> {
        let row = FeedbackPostRow::from(post);
        let vote = NewFeedbackVoteRow {
            post_id: *post.id.as_uuid(),
            user_id: *post.author_id.as_uuid(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored = conn
            .transaction(|conn| {
                async move {
                    let stored = diesel::insert_into(feedback_posts::table)
                        .values(&row)
                        .returning(FeedbackPostRow::as_returning())
                        .get_result(conn)
                        .await?;
                    diesel::insert_into(feedback_votes::table)
                        .values(&vote)
                        .execute(conn)
                        .await?;
                    Ok(stored)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(post_id = %stored.id, "feedback post inserted with self-vote");
        decode(stored)
    }

    async fn update_status(
        &self,
        id: &FeedbackPostId,
        status: FeedbackStatus,
    ) -> Result<bool, FeedbackPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(feedback_posts::table.find(*id.as_uuid()))
            .set(feedback_posts::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn refresh_vote_count(
        &self,
        id: &FeedbackPostId,
    ) -> Result<i32, FeedbackPostRepositoryError> {
        let post_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = conn
            .transaction(|conn| {
                async move {
                    let count: i64 = feedback_votes::table
                        .filter(feedback_votes::post_id.eq(post_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    let stored = i32::try_from(count).unwrap_or(i32::MAX);
                    diesel::update(feedback_posts::table.find(post_id))
                        .set(feedback_posts::num_votes.eq(stored))
                        .execute(conn)
                        .await?;
                    Ok(count)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        i32::try_from(count).map_err(|_| {
            FeedbackPostRepositoryError::query(format!("vote count {count} exceeds column range"))
        })
    }
}
