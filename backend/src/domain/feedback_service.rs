//! Feedback board actions.
//!
//! Implements the [`FeedbackActions`] driving port: posting, voting and the
//! withdraw/unwithdraw status transitions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    FeedbackActions, FeedbackPostRepository, FeedbackPostRepositoryError, FeedbackVoteRepository,
    FeedbackVoteRepositoryError, PageCache, PageCacheError,
};
use crate::domain::{
    ActionError, ActionOutcome, Error, FeedbackDraft, FeedbackPost, FeedbackPostId,
    FeedbackStatus, FeedbackVote, NewFeedbackPost, User, require_user,
};

pub(crate) const NOT_LOGGED_IN: &str = "Not logged in";
pub(crate) const UNKNOWN_POST: &str = "Unknown post";
pub(crate) const POST_NOT_FOUND: &str = "Post not found";
pub(crate) const ONLY_WITHDRAWN: &str = "Only posts with the status 'withdrawn' can be unwithdrawn";
pub(crate) const ALREADY_WITHDRAWN: &str = "Post is already withdrawn";

/// Feedback service over post, vote and page cache ports.
#[derive(Clone)]
pub struct FeedbackService<P, V, C> {
    posts: Arc<P>,
    votes: Arc<V>,
    page_cache: Arc<C>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<P, V, C> FeedbackService<P, V, C> {
    pub fn new(
        posts: Arc<P>,
        votes: Arc<V>,
        page_cache: Arc<C>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            posts,
            votes,
            page_cache,
            clock,
        }
    }
}

fn map_post_error(error: FeedbackPostRepositoryError) -> Error {
    match error {
        FeedbackPostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feedback post repository unavailable: {message}"))
        }
        FeedbackPostRepositoryError::Query { message } => {
            Error::internal(format!("feedback post repository error: {message}"))
        }
        FeedbackPostRepositoryError::UnknownAuthor => Error::unauthorized(NOT_LOGGED_IN),
    }
}

fn map_vote_error(error: FeedbackVoteRepositoryError) -> Error {
    match error {
        FeedbackVoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feedback vote repository unavailable: {message}"))
        }
        FeedbackVoteRepositoryError::Query { message } => {
            Error::internal(format!("feedback vote repository error: {message}"))
        }
        FeedbackVoteRepositoryError::AlreadyVoted => {
            Error::conflict("You have already voted on this post")
        }
    }
}

fn map_cache_error(error: PageCacheError) -> Error {
    match error {
        PageCacheError::Backend { message } => {
            Error::internal(format!("page cache error: {message}"))
        }
    }
}

/// Authors and administrators may change a post's status.
fn may_moderate(user: &User, post: &FeedbackPost) -> bool {
    user.is_admin() || user.id == post.author_id
}

impl<P, V, C> FeedbackService<P, V, C>
where
    P: FeedbackPostRepository,
    V: FeedbackVoteRepository,
    C: PageCache,
{
    async fn load(&self, post_id: &FeedbackPostId) -> Result<Option<FeedbackPost>, Error> {
        self.posts.find_by_id(post_id).await.map_err(map_post_error)
    }

    /// Shared flow of withdraw and unwithdraw: load, authorise, check the
    /// current status, write the new one and invalidate the post page.
    async fn transition(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
        target: FeedbackStatus,
        precondition: impl FnOnce(FeedbackStatus) -> Result<(), ActionError> + Send,
    ) -> Result<ActionOutcome, Error> {
        let Some(post) = self.load(post_id).await? else {
            return Ok(ActionError::form(POST_NOT_FOUND).into());
        };
        let user = match require_user(caller, |user| may_moderate(user, &post)) {
            Ok(user) => user,
            Err(denied) => return Ok(denied.into()),
        };
        if let Err(rejected) = precondition(post.status) {
            return Ok(rejected.into());
        }

        let updated = self
            .posts
            .update_status(&post.id, target)
            .await
            .map_err(map_post_error)?;
        if !updated {
            warn!(post_id = %post.id, "post vanished before status update");
            return Ok(ActionError::form(POST_NOT_FOUND).into());
        }
        let path = post.id.page_path();
        self.page_cache
            .invalidate(&path)
            .await
            .map_err(map_cache_error)?;
        info!(
            post_id = %post.id,
            user_id = %user.id,
            from = %post.status,
            to = %target,
            "feedback status changed"
        );
        Ok(ActionOutcome::Redirect(path))
    }
}

#[async_trait]
impl<P, V, C> FeedbackActions for FeedbackService<P, V, C>
where
    P: FeedbackPostRepository,
    V: FeedbackVoteRepository,
    C: PageCache,
{
    async fn post_feedback(
        &self,
        caller: Option<&User>,
        title: &str,
        body: &str,
    ) -> Result<ActionOutcome, Error> {
        let user = caller.ok_or_else(|| Error::unauthorized(NOT_LOGGED_IN))?;
        let draft = FeedbackDraft::try_from_parts(title, body)?;
        let new_post = NewFeedbackPost::with_self_vote(user.id, draft, self.clock.utc());

        let post = self
            .posts
            .create_with_self_vote(&new_post)
            .await
            .map_err(map_post_error)?;
        info!(post_id = %post.id, author_id = %user.id, "feedback posted");
        Ok(ActionOutcome::Redirect(post.id.page_path()))
    }

    async fn vote_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        let user = caller.ok_or_else(|| Error::unauthorized(NOT_LOGGED_IN))?;
        let post = self
            .load(post_id)
            .await?
            .ok_or_else(|| Error::not_found(UNKNOWN_POST))?;

        self.votes
            .add(&FeedbackVote {
                post_id: post.id,
                user_id: user.id,
            })
            .await
            .map_err(map_vote_error)?;
        let num_votes = self
            .posts
            .refresh_vote_count(&post.id)
            .await
            .map_err(map_post_error)?;

        let path = post.id.page_path();
        self.page_cache
            .invalidate(&path)
            .await
            .map_err(map_cache_error)?;
        info!(post_id = %post.id, user_id = %user.id, num_votes, "vote recorded");
        Ok(ActionOutcome::Revalidated(path))
    }

    async fn withdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        self.transition(caller, post_id, FeedbackStatus::Withdrawn, |status| {
            if status == FeedbackStatus::Withdrawn {
                Err(ActionError::form(ALREADY_WITHDRAWN))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn unwithdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        self.transition(caller, post_id, FeedbackStatus::Open, |status| {
            if status == FeedbackStatus::Withdrawn {
                Ok(())
            } else {
                Err(ActionError::form(ONLY_WITHDRAWN))
            }
        })
        .await
    }

    async fn get_post(&self, post_id: &FeedbackPostId) -> Result<Option<FeedbackPost>, Error> {
        self.load(post_id).await
    }
}
