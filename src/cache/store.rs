// In-memory TTL store.
// Expiration is checked lazily on read; there is no background sweep.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A stored value with the moment it was written.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    /// An entry older than the TTL is treated as absent.
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Key-value store with per-entry expiration.
///
/// Not synchronized internally; the server wraps it in a `Mutex` because
/// axum dispatches handlers across worker threads.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    store: HashMap<String, CacheEntry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: HashMap::new(),
        }
    }

    /// Look up a key, evicting it first if the entry has outlived the TTL.
    pub fn get(&mut self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => Some(entry.value.clone()),
            Some(_) => {
                self.store.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value, unconditionally overwriting any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        self.store.insert(key.into(), CacheEntry::new(value));
    }
}
