//! In-memory response cache.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Append-only cache of raw upstream response bodies.
///
/// Keyed by the canonical parameter string of a request. Entries are never
/// evicted; the cache grows for the lifetime of the value. This suits a
/// session-scoped client, not a long-running server.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, Arc<str>>>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `key`.
    pub async fn get(&self, key: &str) -> Option<Arc<str>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Stores `body` under `key`, replacing any previous (identical) value.
    pub async fn insert(&self, key: String, body: Arc<str>) {
        self.entries.write().await.insert(key, body);
    }

    /// Number of cached responses.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no responses.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every cached response.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
