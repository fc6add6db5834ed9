// ABOUTME: Query cache for note list pages, keyed by (page, search)
// ABOUTME: Keeps last-known results, coalesces concurrent fetches, and supports mass invalidation

use futures::future::{BoxFuture, FutureExt, Shared};
use notehub_client::{ApiError, ListParams, NoteList, NotesApi};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Identifies one list result: page number plus the debounced search term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
        }
    }

    pub fn params(&self) -> ListParams {
        ListParams::new(self.page, self.search.clone())
    }
}

impl Default for QueryKey {
    fn default() -> Self {
        Self::new(1, "")
    }
}

pub type QueryResult = Result<Arc<NoteList>, ApiError>;

type SharedFetch = Shared<BoxFuture<'static, QueryResult>>;

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct Entry {
    data: Option<Arc<NoteList>>,
    fresh: bool,
    in_flight: Option<InFlight>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    /// Bumped by every invalidation; fetches started earlier cannot store fresh data
    generation: u64,
    next_fetch_id: u64,
}

/// Cache of list queries shared between the event loop and fetch tasks.
///
/// The map lock is only taken for bookkeeping and never held across an await.
#[derive(Clone)]
pub struct QueryCache {
    api: Arc<dyn NotesApi>,
    inner: Arc<Mutex<Inner>>,
}

impl QueryCache {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve a key: fresh data is returned as-is, an outstanding request for
    /// the key is joined, otherwise a new request is issued.
    pub async fn resolve(&self, key: QueryKey) -> QueryResult {
        let fetch = {
            let mut inner = self.lock();
            let generation = inner.generation;
            let fetch_id = inner.next_fetch_id;
            let entry = inner.entries.entry(key.clone()).or_default();

            if entry.fresh {
                if let Some(data) = &entry.data {
                    return Ok(data.clone());
                }
            }

            let joined = entry.in_flight.as_ref().map(|f| f.fetch.clone());
            match joined {
                Some(fetch) => {
                    debug!(page = key.page, search = %key.search, "Joining in-flight notes fetch");
                    fetch
                }
                None => {
                    let fetch = self.start_fetch(key.clone(), generation, fetch_id);
                    entry.in_flight = Some(InFlight {
                        id: fetch_id,
                        fetch: fetch.clone(),
                    });
                    inner.next_fetch_id += 1;
                    fetch
                }
            }
        };

        fetch.await
    }

    fn start_fetch(&self, key: QueryKey, generation: u64, fetch_id: u64) -> SharedFetch {
        let api = self.api.clone();
        let inner = self.inner.clone();

        async move {
            debug!(page = key.page, search = %key.search, "Fetching notes page");
            let result = api.list_notes(&key.params()).await.map(Arc::new);

            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            let current_generation = inner.generation;
            if let Some(entry) = inner.entries.get_mut(&key) {
                if entry.in_flight.as_ref().map(|f| f.id) == Some(fetch_id) {
                    entry.in_flight = None;
                }
                if let Ok(data) = &result {
                    if generation == current_generation {
                        entry.data = Some(data.clone());
                        entry.fresh = true;
                    } else if entry.data.is_none() {
                        // Started before an invalidation: usable for display only
                        entry.data = Some(data.clone());
                    }
                }
            }
            result
        }
        .boxed()
        .shared()
    }

    /// Last-known result for a key, fresh or stale
    pub fn peek(&self, key: &QueryKey) -> Option<Arc<NoteList>> {
        self.lock().entries.get(key).and_then(|e| e.data.clone())
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.lock()
            .entries
            .get(key)
            .map(|e| e.fresh && e.data.is_some())
            .unwrap_or(false)
    }

    /// Number of invalidations so far; results tagged with an older value predate a mutation
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock()
            .entries
            .get(key)
            .map(|e| e.in_flight.is_some())
            .unwrap_or(false)
    }

    /// Mark every cached list stale after a mutation.
    ///
    /// Data stays available for display; the next resolve of any key refetches.
    pub fn invalidate_all(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        for entry in inner.entries.values_mut() {
            entry.fresh = false;
            entry.in_flight = None;
        }
        debug!(
            generation = inner.generation,
            entries = inner.entries.len(),
            "Invalidated note lists"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeNotes;

    fn cache_with(api: &Arc<FakeNotes>) -> QueryCache {
        QueryCache::new(api.clone())
    }

    #[test]
    fn test_query_key_equality_is_verbatim() {
        assert_eq!(QueryKey::new(1, "milk"), QueryKey::new(1, "milk"));
        assert_ne!(QueryKey::new(1, "milk"), QueryKey::new(1, "Milk"));
        assert_ne!(QueryKey::new(1, "milk"), QueryKey::new(2, "milk"));
        assert_ne!(QueryKey::new(1, "milk"), QueryKey::new(1, "milk "));
    }

    #[tokio::test]
    async fn test_resolve_fetches_then_serves_fresh() {
        let api = FakeNotes::with_notes(25);
        let cache = cache_with(&api);
        let key = QueryKey::default();

        let first = cache.resolve(key.clone()).await.unwrap();
        assert_eq!(first.notes.len(), 12);
        assert_eq!(first.total_pages, 3);
        assert!(cache.is_fresh(&key));

        let second = cache.resolve(key.clone()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolve_coalesces() {
        let api = FakeNotes::with_notes(5);
        let gate = api.hold_lists();
        let cache = cache_with(&api);
        let key = QueryKey::new(1, "");

        let a = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.resolve(key).await }
        });
        let b = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.resolve(key).await }
        });
        tokio::task::yield_now().await;
        assert!(cache.is_fetching(&key));

        gate.add_permits(1);
        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        assert_eq!(api.list_calls(), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!cache.is_fetching(&key));
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let api = FakeNotes::with_notes(25);
        let cache = cache_with(&api);
        let p1 = cache.resolve(QueryKey::new(1, "")).await.unwrap();
        let p3 = cache.resolve(QueryKey::new(3, "")).await.unwrap();
        assert_eq!(p1.notes.len(), 12);
        assert_eq!(p3.notes.len(), 1);
        assert_eq!(api.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let api = FakeNotes::with_notes(3);
        let cache = cache_with(&api);
        let key = QueryKey::default();

        api.fail_lists(true);
        assert!(cache.resolve(key.clone()).await.is_err());
        assert!(cache.peek(&key).is_none());
        assert!(!cache.is_fetching(&key));

        api.fail_lists(false);
        assert_eq!(cache.resolve(key.clone()).await.unwrap().notes.len(), 3);
        assert_eq!(api.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_stale_data() {
        let api = FakeNotes::with_notes(3);
        let cache = cache_with(&api);
        let key = QueryKey::default();
        cache.resolve(key.clone()).await.unwrap();

        cache.invalidate_all();
        api.fail_lists(true);
        assert!(cache.resolve(key.clone()).await.is_err());
        assert_eq!(cache.peek(&key).unwrap().notes.len(), 3);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch_of_every_key() {
        let api = FakeNotes::with_notes(25);
        let cache = cache_with(&api);
        let k1 = QueryKey::new(1, "");
        let k2 = QueryKey::new(2, "");
        cache.resolve(k1.clone()).await.unwrap();
        cache.resolve(k2.clone()).await.unwrap();

        assert_eq!(cache.generation(), 0);
        cache.invalidate_all();
        assert_eq!(cache.generation(), 1);
        assert!(!cache.is_fresh(&k1));
        assert!(!cache.is_fresh(&k2));
        // Stale data stays displayable
        assert!(cache.peek(&k1).is_some());
        assert!(cache.peek(&k2).is_some());

        cache.resolve(k1.clone()).await.unwrap();
        assert_eq!(api.list_calls(), 3);
        assert!(cache.is_fresh(&k1));
        assert!(!cache.is_fresh(&k2));

        cache.resolve(k2.clone()).await.unwrap();
        assert_eq!(api.list_calls(), 4);
    }

    #[tokio::test]
    async fn test_invalidate_sees_new_notes() {
        let api = FakeNotes::with_notes(12);
        let cache = cache_with(&api);
        let key = QueryKey::default();
        assert_eq!(cache.resolve(key.clone()).await.unwrap().total_pages, 1);

        api.insert("Buy milk", notehub_client::Tag::Shopping);
        // Still fresh: no mutation went through the cache
        assert_eq!(cache.resolve(key.clone()).await.unwrap().total_pages, 1);

        cache.invalidate_all();
        assert_eq!(cache.resolve(key).await.unwrap().total_pages, 2);
    }

    #[tokio::test]
    async fn test_fetch_started_before_invalidation_is_stored_stale() {
        let api = FakeNotes::with_notes(4);
        let gate = api.hold_lists();
        let cache = cache_with(&api);
        let key = QueryKey::default();

        let early = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.resolve(key).await }
        });
        tokio::task::yield_now().await;

        cache.invalidate_all();
        gate.add_permits(1);
        early.await.unwrap().unwrap();

        assert!(cache.peek(&key).is_some());
        assert!(!cache.is_fresh(&key));

        gate.add_permits(1);
        cache.resolve(key.clone()).await.unwrap();
        assert!(cache.is_fresh(&key));
        assert_eq!(api.list_calls(), 2);
    }
}
