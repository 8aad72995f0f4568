//! Driving port for feedback board actions.
//!
//! Every action takes the caller explicitly, as resolved from the request
//! session by the inbound adapter.

use async_trait::async_trait;

use crate::domain::{ActionOutcome, Error, FeedbackPost, FeedbackPostId, User};

#[async_trait]
pub trait FeedbackActions: Send + Sync {
    /// Create a post with its author's vote and redirect to it.
    async fn post_feedback(
        &self,
        caller: Option<&User>,
        title: &str,
        body: &str,
    ) -> Result<ActionOutcome, Error>;

    /// Add the caller's vote and revalidate the post page.
    async fn vote_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error>;

    /// Move a post to `withdrawn`.
    async fn withdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error>;

    /// Move a withdrawn post back to `open`.
    async fn unwithdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error>;

    async fn get_post(&self, post_id: &FeedbackPostId) -> Result<Option<FeedbackPost>, Error>;
}
