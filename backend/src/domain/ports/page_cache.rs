//! Port for invalidating cached page renderings.
//!
//! Each page path carries a revision counter. Invalidating a path bumps the
//! counter. The HTTP adapter folds the revision into a post's `ETag` next to
//! the post's stored state.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by page cache adapters.
    pub enum PageCacheError {
        /// The cache backend rejected the operation.
        Backend { message: String } => "page cache backend failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Mark the rendering of `path` stale.
    async fn invalidate(&self, path: &str) -> Result<(), PageCacheError>;

    /// Current revision of `path`; zero until first invalidated.
    async fn revision(&self, path: &str) -> Result<u64, PageCacheError>;
}

/// Cache that never stores anything; every path stays at revision zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePageCache;

#[async_trait]
impl PageCache for FixturePageCache {
    async fn invalidate(&self, _path: &str) -> Result<(), PageCacheError> {
        Ok(())
    }

    async fn revision(&self, _path: &str) -> Result<u64, PageCacheError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_cache_reports_revision_zero_after_invalidate() {
        let cache = FixturePageCache;
        cache.invalidate("/feedback/x").await.expect("invalidate");
        assert_eq!(cache.revision("/feedback/x").await.expect("revision"), 0);
    }
}
