//! Quote cache
//!
//! TTL-keyed, in-process store from a request fingerprint to the quote that
//! answered it. Expired entries are never returned; they are dropped lazily on
//! lookup, overwritten on the next insert, or removed by `purge_expired`.

use crate::dex::quote::Quote;
use log::{debug, info};
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_entries: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub quote: Quote,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheStorage {
    entries: HashMap<String, CacheEntry>,
    metrics: CacheMetrics,
}

pub struct QuoteCache {
    storage: Mutex<CacheStorage>,
    config: CacheConfig,
}

impl QuoteCache {
    pub fn new(config: CacheConfig) -> Self {
        info!(
            "🗄️  Initializing quote cache (TTL: {:?}, Max entries: {})",
            config.ttl, config.max_entries
        );
        Self {
            storage: Mutex::new(CacheStorage {
                entries: HashMap::new(),
                metrics: CacheMetrics::default(),
            }),
            config,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    pub async fn get(&self, fingerprint: &str) -> Option<Quote> {
        let now = Instant::now();
        let mut storage = self.storage.lock().await;

        let live = match storage.entries.get(fingerprint).map(|entry| entry.is_live(now)) {
            Some(true) => storage.entries.get(fingerprint).map(|entry| entry.quote.clone()),
            Some(false) => {
                storage.entries.remove(fingerprint);
                debug!("⏰ Cache entry expired for {}", fingerprint);
                None
            }
            None => None,
        };

        match live {
            Some(quote) => {
                storage.metrics.hits += 1;
                debug!("🎯 Cache HIT for {}", fingerprint);
                Some(quote)
            }
            None => {
                storage.metrics.misses += 1;
                debug!("📡 Cache MISS for {}", fingerprint);
                None
            }
        }
    }

    /// Stores `quote` under `fingerprint` for the configured TTL.
    pub async fn insert(&self, fingerprint: String, quote: Quote) {
        self.put(fingerprint, quote, self.config.ttl).await;
    }

    pub async fn put(&self, fingerprint: String, quote: Quote, ttl: Duration) {
        let now = Instant::now();
        let mut storage = self.storage.lock().await;

        if !storage.entries.contains_key(&fingerprint)
            && storage.entries.len() >= self.config.max_entries
        {
            let before = storage.entries.len();
            storage.entries.retain(|_, entry| entry.is_live(now));
            let mut evicted = (before - storage.entries.len()) as u64;

            if storage.entries.len() >= self.config.max_entries {
                let oldest = storage
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    storage.entries.remove(&key);
                    evicted += 1;
                }
            }
            storage.metrics.evictions += evicted;
        }

        storage.entries.insert(
            fingerprint,
            CacheEntry {
                quote,
                expires_at: now + ttl,
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut storage = self.storage.lock().await;
        let before = storage.entries.len();
        storage.entries.retain(|_, entry| entry.is_live(now));
        let removed = before - storage.entries.len();
        storage.metrics.evictions += removed as u64;
        if removed > 0 {
            debug!("🗑️  Purged {} expired quote(s)", removed);
        }
        removed
    }

    pub async fn metrics(&self) -> CacheMetrics {
        let storage = self.storage.lock().await;
        let mut metrics = storage.metrics.clone();
        metrics.total_entries = storage.entries.len();
        metrics
    }

    pub async fn len(&self) -> usize {
        self.storage.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
