//! Session-scoped query cache.
//!
//! Entries are keyed by the logical identity of a query (`["categories",
//! "hierarchy"]`, `["brands", "detail", "42"]`) and partitioned per session so
//! one user's credentials never serve another user's reads. Mutations
//! invalidate by key prefix across every session; the next read refetches.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::modules::catalog_api::ApiError;

/// Logical identity of a cached query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Extend the key by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

pub struct QueryCache {
    scopes: RwLock<HashMap<String, HashMap<QueryKey, CacheEntry>>>,
    ttl: Duration,
    /// Bumped by every invalidation; a fetch that started under an older
    /// generation must not store its result
    generation: AtomicU64,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    /// Return the fresh cached value for `key`, or run `fetch` and store its
    /// result. Failed fetches are never cached.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        scope: &str,
        key: QueryKey,
        fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(value) = self.get(scope, &key).await {
            match serde_json::from_value::<T>(value) {
                Ok(hit) => {
                    tracing::debug!("Query cache hit: {}", key);
                    return Ok(hit);
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable cache entry {}: {}", key, e);
                }
            }
        }

        tracing::debug!("Query cache miss: {}", key);
        let generation = self.generation.load(Ordering::SeqCst);
        let fetched = fetch().await?;

        match serde_json::to_value(&fetched) {
            Ok(value) => self.put(scope, key, value, generation).await,
            Err(e) => tracing::warn!("Not caching {}: {}", key, e),
        }

        Ok(fetched)
    }

    async fn get(&self, scope: &str, key: &QueryKey) -> Option<Value> {
        let scopes = self.scopes.read().await;
        let entry = scopes.get(scope)?.get(key)?;
        entry.is_fresh(self.ttl).then(|| entry.value.clone())
    }

    /// Store a fetched value unless an invalidation ran while it was in
    /// flight. Expired entries and emptied scopes are swept on the way.
    async fn put(&self, scope: &str, key: QueryKey, value: Value, generation: u64) {
        let mut scopes = self.scopes.write().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping {} fetched before an invalidation", key);
            return;
        }

        let ttl = self.ttl;
        scopes.retain(|_, entries| {
            entries.retain(|_, entry| entry.is_fresh(ttl));
            !entries.is_empty()
        });

        scopes.entry(scope.to_string()).or_default().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every entry whose key starts with `prefix`, in all sessions.
    /// Returns how many entries were removed.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut scopes = self.scopes.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut removed = 0;
        for entries in scopes.values_mut() {
            let before = entries.len();
            entries.retain(|key, _| !key.starts_with(prefix));
            removed += before - entries.len();
        }
        tracing::debug!("Invalidated {} cached queries under {}", removed, prefix);
        removed
    }

    /// Forget everything cached for one session (logout, expired credential)
    pub async fn clear_scope(&self, scope: &str) {
        let mut scopes = self.scopes.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(entries) = scopes.remove(scope) {
            tracing::debug!("Cleared {} cached queries for session", entries.len());
        }
    }

    /// Number of entries held for a session, stale ones included
    #[cfg(test)]
    pub async fn len(&self, scope: &str) -> usize {
        self.scopes
            .read()
            .await
            .get(scope)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn categories() -> QueryKey {
        QueryKey::new(["categories"])
    }

    async fn fetch_counted(calls: &AtomicUsize, value: i64) -> Result<i64, ApiError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[test]
    fn test_query_key_prefix() {
        let hierarchy = categories().child("hierarchy");
        assert!(hierarchy.starts_with(&categories()));
        assert!(!categories().starts_with(&hierarchy));
        assert!(!QueryKey::new(["categories-archive"]).starts_with(&categories()));
        assert_eq!(hierarchy.to_string(), "categories/hierarchy");
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = categories().child("hierarchy");

        let first = cache
            .get_or_fetch("s1", key.clone(), || fetch_counted(&calls, 1))
            .await
            .unwrap();
        let second = cache
            .get_or_fetch("s1", key, || fetch_counted(&calls, 2))
            .await
            .unwrap();

        assert_eq!((first, second), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch_in_every_scope() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = categories().child("list");

        for scope in ["s1", "s2"] {
            cache
                .get_or_fetch(scope, key.clone(), || fetch_counted(&calls, 1))
                .await
                .unwrap();
        }
        cache
            .get_or_fetch("s1", QueryKey::new(["brands", "list"]), || {
                fetch_counted(&calls, 9)
            })
            .await
            .unwrap();

        assert_eq!(cache.invalidate(&categories()).await, 2);
        assert_eq!(cache.len("s1").await, 1);

        let refetched = cache
            .get_or_fetch("s2", key, || fetch_counted(&calls, 5))
            .await
            .unwrap();
        assert_eq!(refetched, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_scopes_are_isolated_and_clearable() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new(["auth", "me"]);

        cache
            .get_or_fetch("alice", key.clone(), || fetch_counted(&calls, 1))
            .await
            .unwrap();
        let bob = cache
            .get_or_fetch("bob", key, || fetch_counted(&calls, 2))
            .await
            .unwrap();
        assert_eq!(bob, 2);

        cache.clear_scope("alice").await;
        assert_eq!(cache.len("alice").await, 0);
        assert_eq!(cache.len("bob").await, 1);
    }

    #[tokio::test]
    async fn test_stale_entries_and_failures_are_not_served() {
        let cache = QueryCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        let key = categories().child("stats");

        cache
            .get_or_fetch("s1", key.clone(), || fetch_counted(&calls, 1))
            .await
            .unwrap();
        cache
            .get_or_fetch("s1", key.clone(), || fetch_counted(&calls, 2))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let fresh = QueryCache::new(Duration::from_secs(60));
        let failed: Result<i64, ApiError> = fresh
            .get_or_fetch("s1", key, || async {
                Err(ApiError::Transport("down".to_string()))
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(fresh.len("s1").await, 0);
    }

    #[tokio::test]
    async fn test_read_in_flight_during_invalidation_is_not_stored() {
        let cache = Arc::new(QueryCache::new(Duration::from_secs(60)));
        let key = QueryKey::new(["brands", "list"]);
        let (release, released) = oneshot::channel::<()>();
        let (started, has_started) = oneshot::channel::<()>();

        let slow_read = {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .get_or_fetch("s1", key, || async move {
                        let _ = started.send(());
                        let _ = released.await;
                        Ok::<_, ApiError>("old".to_string())
                    })
                    .await
            })
        };

        has_started.await.unwrap();
        cache.invalidate(&QueryKey::new(["brands"])).await;
        release.send(()).unwrap();
        assert_eq!(slow_read.await.unwrap().unwrap(), "old");

        let next = cache
            .get_or_fetch("s1", key, || async { Ok::<_, ApiError>("new".to_string()) })
            .await
            .unwrap();
        assert_eq!(next, "new");
    }

    #[tokio::test]
    async fn test_expired_entries_and_scopes_are_swept() {
        let cache = QueryCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for n in 0..1000 {
            let scope = format!("session-{}", n);
            cache
                .get_or_fetch(&scope, categories().child("list"), || {
                    fetch_counted(&calls, n)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1000);
        assert_eq!(cache.scopes.read().await.len(), 1);
    }
}
