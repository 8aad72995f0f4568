//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AuthAdapter, FeedbackActions, PageCache};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthAdapter>,
    pub feedback: Arc<dyn FeedbackActions>,
    pub page_cache: Arc<dyn PageCache>,
    /// Used to discard expired sessions.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpState {
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use feedback_board::domain::ports::{AuthAdapter, FeedbackActions, FixturePageCache};
    /// use feedback_board::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// fn build(auth: Arc<dyn AuthAdapter>, feedback: Arc<dyn FeedbackActions>) -> HttpState {
    ///     HttpState::new(auth, feedback, Arc::new(FixturePageCache), Arc::new(DefaultClock))
    /// }
    /// ```
    pub fn new(
        auth: Arc<dyn AuthAdapter>,
        feedback: Arc<dyn FeedbackActions>,
        page_cache: Arc<dyn PageCache>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            auth,
            feedback,
            page_cache,
            clock,
        }
    }
}
