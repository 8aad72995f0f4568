//! Request correlation identifier.
//!
//! The HTTP `Trace` middleware puts a [`TraceId`] in task-local storage for
//! the lifetime of each request, so domain errors and log lines can pick it up
//! without it being threaded through every call. Task locals do not follow
//! `tokio::spawn`; wrap spawned work in [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation identifier for one inbound request.
///
/// # Examples
/// ```
/// use feedback_board::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier currently in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_is_scoped_to_the_future() {
        let id = TraceId::generate();
        let inside = TraceId::scope(id, async { TraceId::current() }).await;
        assert_eq!(inside, Some(id));
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn parse_rejects_non_uuid() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }

    #[test]
    fn display_is_hyphenated_uuid() {
        let id: TraceId = "6f1c7a9e-3c1b-4d5e-8f00-0123456789ab"
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "6f1c7a9e-3c1b-4d5e-8f00-0123456789ab");
    }
}
