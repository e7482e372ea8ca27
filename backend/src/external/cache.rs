//! In-memory response cache for upstream calls
//!
//! Entries carry an expiry timestamp. Expired entries are reported as such
//! and dropped the next time anything is written.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A cached body with its timestamps
#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone)]
pub struct CachedData {
    pub body: String,
    pub cached_at: DateTime<Utc>,
    pub is_expired: bool,
}

/// Response bodies keyed by the full upstream query
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store a body under `key`, replacing any previous entry
    pub async fn write(&self, key: &str, body: String) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                body,
                cached_at: now,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Read the entry for `key`, expired or not
    pub async fn read(&self, key: &str) -> Option<CachedData> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        Some(CachedData {
            body: entry.body.clone(),
            cached_at: entry.cached_at,
            is_expired: Utc::now() >= entry.expires_at,
        })
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
