//! Response cache with per-key request coalescing.
//!
//! The cache is an explicitly constructed object owned by the library
//! client and passed by reference; nothing here is global. Mutation is
//! serialized through a key-based lock map: at most one fetch per key is
//! in flight, and concurrent requesters for the same key observe the same
//! eventual result.
//!
//! Retry policy also lives here, not in the transport: a failed fetch is
//! retried once before the error is surfaced to the caller.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::rpc::RpcError;

/// How long an entry survives without being read before the sweeper drops it.
pub const GC_IDLE_WINDOW: Duration = Duration::from_secs(30 * 60);

/// How often the sweeper runs.
pub const GC_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Failed fetches are shared with coalesced waiters for this long, then
/// the next caller refetches.
const ERROR_FRESHNESS: Duration = Duration::from_secs(2);

/// Automatic retries per fetch after the initial attempt.
const MAX_RETRIES: u32 = 1;

/// Entity kinds the cache distinguishes, each with its own freshness
/// window: library metadata changes rarely, connectivity constantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    AlbumDetails,
    ArtistDetails,
    ArtistList,
    AlbumList,
    MovieDetails,
    MovieList,
    TvShowDetails,
    TvShowList,
    SeasonList,
    EpisodeList,
    EpisodeDetails,
    ChannelList,
    RecordingList,
    RecordingDetails,
    TimerList,
    Connection,
    Search,
}

impl QueryKind {
    /// Freshness window for entries of this kind.
    pub fn freshness(self) -> Duration {
        use QueryKind::*;
        match self {
            AlbumDetails | ArtistDetails | MovieDetails | TvShowDetails | EpisodeDetails => {
                Duration::from_secs(15 * 60)
            }
            ArtistList | AlbumList | MovieList | TvShowList | SeasonList | EpisodeList
            | ChannelList | TimerList => Duration::from_secs(5 * 60),
            RecordingList | RecordingDetails => Duration::from_secs(2 * 60),
            Connection => Duration::from_secs(30),
            Search => Duration::from_secs(60),
        }
    }

    fn as_str(self) -> &'static str {
        use QueryKind::*;
        match self {
            AlbumDetails => "album-details",
            ArtistDetails => "artist-details",
            ArtistList => "artist-list",
            AlbumList => "album-list",
            MovieDetails => "movie-details",
            MovieList => "movie-list",
            TvShowDetails => "tvshow-details",
            TvShowList => "tvshow-list",
            SeasonList => "season-list",
            EpisodeList => "episode-list",
            EpisodeDetails => "episode-details",
            ChannelList => "channel-list",
            RecordingList => "recording-list",
            RecordingDetails => "recording-details",
            TimerList => "timer-list",
            Connection => "connection",
            Search => "search",
        }
    }
}

/// Cache key: entity kind plus an identifier/parameter discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: QueryKind,
    pub ident: String,
}

impl QueryKey {
    pub fn new(kind: QueryKind, ident: impl Into<String>) -> Self {
        Self {
            kind,
            ident: ident.into(),
        }
    }
}

struct CacheEntry {
    value: Result<Value, RpcError>,
    fetched_at: Instant,
    last_used: Instant,
    /// Retries spent producing `value`.
    retries: u32,
}

impl CacheEntry {
    fn is_fresh(&self, freshness: Duration, now: Instant) -> bool {
        let window = match &self.value {
            Ok(_) => freshness,
            Err(_) => ERROR_FRESHNESS,
        };
        now.duration_since(self.fetched_at) <= window
    }
}

/// In-memory response cache keyed by [`QueryKey`].
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
    /// One async mutex per key; holding it is the right to fetch that key.
    locks: Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch through the cache.
    ///
    /// Returns the cached value while fresh; otherwise runs `fetch` with
    /// at most one automatic retry, stores the outcome and returns it.
    /// Concurrent callers for the same key coalesce onto a single fetch
    /// and observe the same result. Cancellation is returned immediately
    /// and never cached.
    pub async fn fetch<F, Fut>(
        &self,
        key: QueryKey,
        cancel: &CancellationToken,
        fetch: F,
    ) -> Result<Value, RpcError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, RpcError>>,
    {
        if let Some(hit) = self.lookup(&key).await {
            return hit;
        }

        let lock = self.key_lock(&key).await;
        let _guard = lock.lock().await;

        // Re-check: the previous lock holder may have filled this key.
        if let Some(hit) = self.lookup(&key).await {
            return hit;
        }

        let (value, retries) = run_with_retry(&key, cancel, &fetch).await;

        if value != Err(RpcError::Cancelled) {
            let now = Instant::now();
            let mut entries = self.entries.write().await;
            entries.insert(
                key,
                CacheEntry {
                    value: value.clone(),
                    fetched_at: now,
                    last_used: now,
                    retries,
                },
            );
        }

        value
    }

    async fn lookup(&self, key: &QueryKey) -> Option<Result<Value, RpcError>> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(key)?;
        if !entry.is_fresh(key.kind.freshness(), now) {
            return None;
        }
        entry.last_used = now;
        trace!(kind = key.kind.as_str(), ident = %key.ident, "cache hit");
        Some(entry.value.clone())
    }

    async fn key_lock(&self, key: &QueryKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop every entry of the given kind (sort or filter changed, or the
    /// caller wants the next read to hit the server).
    pub async fn invalidate_kind(&self, kind: QueryKind) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| key.kind != kind);
        let dropped = before - entries.len();
        if dropped > 0 {
            debug!(kind = kind.as_str(), dropped, "invalidated cache entries");
        }
    }

    /// Drop entries not read within `idle` and the lock handles nothing
    /// references anymore. Returns how many entries were evicted.
    pub async fn purge_idle(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let retained: std::collections::HashSet<QueryKey> = {
            let mut entries = self.entries.write().await;
            entries.retain(|_, entry| now.duration_since(entry.last_used) <= idle);
            entries.keys().cloned().collect()
        };

        let evicted = {
            let mut locks = self.locks.lock().await;
            let before = locks.len();
            // A strong count above one means a fetch currently holds the lock.
            locks.retain(|key, lock| Arc::strong_count(lock) > 1 || retained.contains(key));
            before - locks.len()
        };

        evicted
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Retries recorded for a key's last fetch, if it is cached.
    #[cfg(test)]
    async fn retries_for(&self, key: &QueryKey) -> Option<u32> {
        self.entries.read().await.get(key).map(|e| e.retries)
    }
}

async fn run_with_retry<F, Fut>(
    key: &QueryKey,
    cancel: &CancellationToken,
    fetch: &F,
) -> (Result<Value, RpcError>, u32)
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Value, RpcError>>,
{
    let mut retries = 0;
    loop {
        if cancel.is_cancelled() {
            return (Err(RpcError::Cancelled), retries);
        }
        match fetch().await {
            Ok(value) => {
                debug!(kind = key.kind.as_str(), ident = %key.ident, retries, "cache fill");
                return (Ok(value), retries);
            }
            Err(RpcError::Cancelled) => return (Err(RpcError::Cancelled), retries),
            Err(err) if retries < MAX_RETRIES => {
                warn!(kind = key.kind.as_str(), ident = %key.ident, %err, "query failed, retrying");
                retries += 1;
            }
            Err(err) => {
                warn!(kind = key.kind.as_str(), ident = %key.ident, %err, "query failed");
                return (Err(err), retries);
            }
        }
    }
}

/// Periodic sweep evicting idle entries; runs until the token fires.
pub fn spawn_gc(cache: Arc<QueryCache>, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut sweep = tokio::time::interval(GC_SWEEP_INTERVAL);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("cache sweeper shutting down");
                    break;
                }
                _ = sweep.tick() => {
                    let evicted = cache.purge_idle(GC_IDLE_WINDOW).await;
                    if evicted > 0 {
                        debug!(evicted, "evicted idle cache entries");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(ident: &str) -> QueryKey {
        QueryKey::new(QueryKind::AlbumDetails, ident)
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        for _ in 0..2 {
            let value = cache
                .fetch(key("1"), &cancel, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({ "albumid": 1 }))
                })
                .await
                .unwrap();
            assert_eq!(value, json!({ "albumid": 1 }));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_requests_coalesce_onto_one_fetch() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();

        let fetch = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Hold the in-flight slot long enough for the second
                    // requester to arrive.
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(json!("shared"))
                }
            }
        };

        let (a, b) = tokio::join!(
            cache.fetch(key("7"), &cancel, fetch.clone()),
            cache.fetch(key("7"), &cancel, fetch),
        );

        assert_eq!(a.unwrap(), json!("shared"));
        assert_eq!(b.unwrap(), json!("shared"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_coalesce() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!(true))
        };

        cache.fetch(key("1"), &cancel, fetch).await.unwrap();
        cache.fetch(key("2"), &cancel, fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn transient_failure_is_retried_exactly_once() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let value = cache
            .fetch(key("3"), &cancel, || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RpcError::Transport("connection refused".to_string()))
                } else {
                    Ok(json!("recovered"))
                }
            })
            .await
            .unwrap();

        assert_eq!(value, json!("recovered"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.retries_for(&key("3")).await, Some(1));
    }

    #[tokio::test]
    async fn persistent_failure_surfaces_after_one_retry() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let err = cache
            .fetch(key("4"), &cancel, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<Value, _>(RpcError::Protocol {
                    code: -32100,
                    message: "busy".to_string(),
                })
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RpcError::Protocol {
                code: -32100,
                message: "busy".to_string()
            }
        );
        // Initial attempt plus exactly one retry.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn immediate_follow_up_shares_the_cached_error() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<Value, _>(RpcError::Transport("down".to_string()))
        };

        let first = cache.fetch(key("5"), &cancel, fetch).await.unwrap_err();
        let second = cache.fetch(key("5"), &cancel, fetch).await.unwrap_err();

        assert_eq!(first, second);
        // Two attempts for the first caller, none for the second.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_without_fetching() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = cache
            .fetch(key("6"), &cancel, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!(null))
            })
            .await
            .unwrap_err();

        assert_eq!(err, RpcError::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // Cancellation is never cached.
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn invalidate_kind_only_touches_that_kind() {
        let cache = QueryCache::new();
        let cancel = CancellationToken::new();

        cache
            .fetch(key("1"), &cancel, || async { Ok(json!(1)) })
            .await
            .unwrap();
        cache
            .fetch(
                QueryKey::new(QueryKind::MovieList, "start=0"),
                &cancel,
                || async { Ok(json!(2)) },
            )
            .await
            .unwrap();

        cache.invalidate_kind(QueryKind::MovieList).await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn purge_drops_idle_entries_and_their_locks() {
        let cache = QueryCache::new();
        let cancel = CancellationToken::new();

        cache
            .fetch(key("1"), &cancel, || async { Ok(json!(1)) })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);

        cache.purge_idle(Duration::ZERO).await;
        assert_eq!(cache.len().await, 0);
        assert!(cache.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn freshness_windows_are_kind_specific() {
        // Connectivity churns, library metadata does not.
        assert!(QueryKind::Connection.freshness() < QueryKind::MovieList.freshness());
        assert!(QueryKind::MovieList.freshness() < QueryKind::AlbumDetails.freshness());
    }
}
