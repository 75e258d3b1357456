/// In-memory cache of task list queries
///
/// Read-through cache keyed by organization plus the full list-query shape
/// (status filter, page, limit). Entries expire after a fixed TTL; every
/// task mutation calls [`ListCache::invalidate_org`] before reporting
/// success, so staleness beyond a single in-flight read is bounded by
/// explicit invalidation rather than the TTL.
///
/// The cache is process-wide state created once at startup and shared via
/// the application state, like the signing key — no module-level globals.
///
/// # Example
///
/// ```
/// use taskflow_shared::cache::ListCache;
/// use std::time::Duration;
///
/// let cache = ListCache::new(Duration::from_secs(60));
/// assert!(cache.get(1, "status=None:page=1:limit=10").is_none());
/// ```
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::models::task::{Task, TaskFilter};

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    org_id: i64,
    query: String,
}

struct CacheEntry {
    inserted_at: Instant,
    tasks: Vec<Task>,
}

/// TTL-bounded cache of list-query results, keyed by organization
pub struct ListCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl ListCache {
    /// Creates an empty cache with the given entry TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Builds the query portion of a cache key from a validated filter
    pub fn query_key(filter: &TaskFilter) -> String {
        format!(
            "status={:?}:page={}:limit={}",
            filter.status(),
            filter.page(),
            filter.limit()
        )
    }

    /// Looks up a cached result, honoring the TTL
    ///
    /// Expired entries are treated as absent; they are physically removed by
    /// the sweep that runs on every insert.
    pub fn get(&self, org_id: i64, query: &str) -> Option<Vec<Task>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let key = CacheKey {
            org_id,
            query: query.to_string(),
        };

        let entry = entries.get(&key)?;
        if entry.inserted_at.elapsed() >= self.ttl {
            return None;
        }

        Some(entry.tasks.clone())
    }

    /// Stores a list-query result
    ///
    /// Sweeps expired entries first, so the map cannot grow without bound
    /// from readers varying their query shape against a quiet organization.
    pub fn insert(&self, org_id: i64, query: &str, tasks: Vec<Task>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        entries.insert(
            CacheKey {
                org_id,
                query: query.to_string(),
            },
            CacheEntry {
                inserted_at: Instant::now(),
                tasks,
            },
        );
    }

    /// Drops every cached entry for an organization
    ///
    /// Called by create/update/delete before the mutation is reported as
    /// successful, so subsequent lists never serve the pre-mutation state.
    pub fn invalidate_org(&self, org_id: i64) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|key, _| key.org_id != org_id);
    }

    /// Number of live entries (expired entries included until swept)
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
