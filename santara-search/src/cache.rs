use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use santara_core::SearchRequest;

/// How often the background sweeper evicts expired entries.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub size: usize,
}

struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

/// Fixed-TTL in-memory cache. Readers share a lock; writers and the sweeper
/// take it exclusively. An expired entry is logically absent: `get` never
/// returns it even before the sweeper has run.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            Some(_) => {
                // Leave removal to the sweeper; the read lock is shared.
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.expirations.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn set(&self, key: String, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes every expired entry, returning how many were evicted.
    pub async fn sweep(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            self.expirations.fetch_add(removed as u64, Ordering::Relaxed);
        }
        removed
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            size: self.entries.read().await.len(),
        }
    }
}

/// Spawns the periodic sweeper for a shared cache.
pub fn spawn_sweeper<T>(cache: Arc<TtlCache<T>>, interval: Duration) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            let removed = cache.sweep().await;
            if removed > 0 {
                tracing::debug!(removed, "evicted expired cache entries");
            }
        }
    })
}

/// Derives the cache key for a search request: canonical JSON, SHA-256,
/// first 8 bytes as hex, behind a fixed prefix. Structurally equal requests
/// always map to the same key.
pub fn request_fingerprint(req: &SearchRequest) -> String {
    let encoded = match serde_json::to_vec(req) {
        Ok(encoded) => encoded,
        Err(_) => return format!("search:{req:?}"),
    };
    let digest = Sha256::digest(&encoded);
    let hex = format!("{digest:x}");
    format!("search:{}", &hex[..16])
}
