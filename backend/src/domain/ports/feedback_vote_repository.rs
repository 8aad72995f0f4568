//! Port for feedback votes.
use async_trait::async_trait;

use crate::domain::FeedbackVote;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by feedback vote adapters.
    pub enum FeedbackVoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback vote repository query failed: {message}",
        /// The user has already voted on this post.
        AlreadyVoted => "user has already voted on this post",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackVoteRepository: Send + Sync {
    /// Record a vote. The `(post_id, user_id)` pair is unique.
    async fn add(&self, vote: &FeedbackVote) -> Result<(), FeedbackVoteRepositoryError>;
}
