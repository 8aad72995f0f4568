//! In-process page cache adapter.
//!
//! Keeps a revision counter per page path. The counters live only as long as
//! the process and reset to zero on restart; validators built from them must
//! also carry the stored post state.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PageCache, PageCacheError};

/// [`PageCache`] backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct InMemoryPageCache {
    revisions: RwLock<HashMap<String, u64>>,
}

impl InMemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> PageCacheError {
    PageCacheError::backend("page cache lock poisoned")
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn invalidate(&self, path: &str) -> Result<(), PageCacheError> {
        let mut revisions = self.revisions.write().map_err(poisoned)?;
        let revision = revisions.entry(path.to_owned()).or_insert(0);
        *revision = revision.saturating_add(1);
        debug!(path, revision = *revision, "page invalidated");
        Ok(())
    }

    async fn revision(&self, path: &str) -> Result<u64, PageCacheError> {
        let revisions = self.revisions.read().map_err(poisoned)?;
        Ok(revisions.get(path).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unknown_path_is_revision_zero() {
        let cache = InMemoryPageCache::new();
        assert_eq!(cache.revision("/feedback/a").await.expect("revision"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn invalidate_bumps_only_that_path() {
        let cache = InMemoryPageCache::new();

        cache.invalidate("/feedback/a").await.expect("invalidate");
        cache.invalidate("/feedback/a").await.expect("invalidate");
        cache.invalidate("/feedback/b").await.expect("invalidate");

        assert_eq!(cache.revision("/feedback/a").await.expect("revision"), 2);
        assert_eq!(cache.revision("/feedback/b").await.expect("revision"), 1);
    }
}
