//! Assemble the HTTP state from Diesel adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use feedback_board::domain::{FeedbackService, RepositoryAuthAdapter};
use feedback_board::inbound::http::state::HttpState;
use feedback_board::outbound::cache::InMemoryPageCache;
use feedback_board::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselFeedbackPostRepository, DieselFeedbackVoteRepository,
    DieselSessionRepository, DieselUserRepository, DieselVerificationTokenRepository,
};

/// Wire repositories into the auth adapter and feedback service.
///
/// The page cache is shared: votes invalidate through the service, post
/// reads take their `ETag` from the same instance.
pub(crate) fn build_http_state(pool: &DbPool) -> HttpState {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let page_cache = Arc::new(InMemoryPageCache::default());

    let auth = RepositoryAuthAdapter::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselAccountRepository::new(pool.clone())),
        Arc::new(DieselSessionRepository::new(pool.clone())),
        Arc::new(DieselVerificationTokenRepository::new(pool.clone())),
    );
    let feedback = FeedbackService::new(
        Arc::new(DieselFeedbackPostRepository::new(pool.clone())),
        Arc::new(DieselFeedbackVoteRepository::new(pool.clone())),
        page_cache.clone(),
        clock.clone(),
    );

    HttpState::new(Arc::new(auth), Arc::new(feedback), page_cache, clock)
}
