//! Port for feedback post persistence.
use async_trait::async_trait;

use crate::domain::{FeedbackPost, FeedbackPostId, FeedbackStatus, NewFeedbackPost};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by feedback post adapters.
    pub enum FeedbackPostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback post repository query failed: {message}",
        /// The post author does not exist.
        UnknownAuthor => "feedback post author does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackPostRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &FeedbackPostId,
    ) -> Result<Option<FeedbackPost>, FeedbackPostRepositoryError>;

    /// Insert the post and its author's vote in one transaction. Either both
    /// rows exist afterwards or neither does.
    async fn create_with_self_vote(
        &self,
        post: &NewFeedbackPost,
    ) -> Result<FeedbackPost, FeedbackPostRepositoryError>;

    /// Set the status; `false` when the post no longer exists.
    async fn update_status(
        &self,
        id: &FeedbackPostId,
        status: FeedbackStatus,
    ) -> Result<bool, FeedbackPostRepositoryError>;

    /// Recompute `num_votes` from the vote rows, persist and return it.
    async fn refresh_vote_count(
        &self,
        id: &FeedbackPostId,
    ) -> Result<i32, FeedbackPostRepositoryError>;
}
