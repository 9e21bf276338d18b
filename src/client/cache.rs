use std::sync::atomic::{AtomicU64, Ordering};

/// Read-side cache for GET endpoints, keyed by request path and query.
///
/// Concurrent fetches for the same key race; tickets decide the race.
/// A fetch takes a ticket before it starts and may only store its result
/// while its ticket is still the freshest taken for that key, so a slow
/// stale response can never clobber a newer one. Invalidations take a
/// ticket too: a fetch that began before the invalidation carries an
/// older ticket and its result is discarded on arrival, so a mutation's
/// invalidation cannot be undone by an in-flight read.
pub struct QueryCache {
    entries: scc::HashMap<String, CacheEntry>,
    next_ticket: AtomicU64,
    invalidated_at: AtomicU64,
}

struct CacheEntry {
    ticket: u64,
    value: serde_json::Value,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: scc::HashMap::new(),
            next_ticket: AtomicU64::new(1),
            invalidated_at: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries
            .read_async(key, |_, entry| entry.value.clone())
            .await
    }

    /// Takes a ticket for a fetch that is about to start.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }

    /// Stores the fetch result unless a fresher fetch already landed or
    /// an invalidation superseded the ticket.
    pub async fn complete(&self, key: &str, ticket: u64, value: serde_json::Value) {
        if ticket <= self.invalidated_at.load(Ordering::Relaxed) {
            return;
        }

        let updated = self
            .entries
            .update_async(key, |_, entry| {
                if ticket > entry.ticket {
                    entry.ticket = ticket;
                    entry.value = value.clone();
                }
            })
            .await;

        if updated.is_none() {
            // Lost-insert race just means the other fetch's value stays.
            let _ = self
                .entries
                .insert_async(key.to_string(), CacheEntry { ticket, value })
                .await;
        }
    }

    /// Drops every key under a path prefix, for mutations that touch
    /// an entire collection. Fetches already in flight are fenced out.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        self.fence();
        self.entries
            .retain_async(|key, _| !key.starts_with(prefix))
            .await;
    }

    pub async fn clear(&self) {
        self.fence();
        self.entries.clear_async().await;
    }

    // Every ticket taken so far is now superseded.
    fn fence(&self) {
        let barrier = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.invalidated_at.fetch_max(barrier, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn stores_and_returns_values() {
        let cache = QueryCache::new();
        let ticket = cache.begin();
        cache.complete("posts", ticket, json!({"posts": []})).await;

        assert_eq!(cache.get("posts").await, Some(json!({"posts": []})));
        assert_eq!(cache.get("categories").await, None);
    }

    #[tokio::test]
    async fn stale_fetch_cannot_overwrite_a_fresher_one() {
        let cache = QueryCache::new();
        let slow = cache.begin();
        let fast = cache.begin();

        // The later fetch lands first.
        cache.complete("posts", fast, json!("fresh")).await;
        cache.complete("posts", slow, json!("stale")).await;

        assert_eq!(cache.get("posts").await, Some(json!("fresh")));
    }

    #[tokio::test]
    async fn prefix_invalidation_spares_other_keys() {
        let cache = QueryCache::new();
        let t1 = cache.begin();
        let t2 = cache.begin();
        let t3 = cache.begin();
        cache.complete("posts?limit=10", t1, json!(1)).await;
        cache.complete("posts/7", t2, json!(2)).await;
        cache.complete("categories", t3, json!(3)).await;

        cache.invalidate_prefix("posts").await;

        assert_eq!(cache.get("posts?limit=10").await, None);
        assert_eq!(cache.get("posts/7").await, None);
        assert_eq!(cache.get("categories").await, Some(json!(3)));
    }

    #[tokio::test]
    async fn invalidation_outlasts_an_in_flight_fetch() {
        let cache = QueryCache::new();

        // Fetch starts, a mutation invalidates while it is in flight,
        // then the pre-mutation result arrives. It must not be cached.
        let ticket = cache.begin();
        cache.invalidate_prefix("posts").await;
        cache.complete("posts?limit=10", ticket, json!("pre-mutation")).await;

        assert_eq!(cache.get("posts?limit=10").await, None);

        // A fetch begun after the invalidation caches normally.
        let fresh = cache.begin();
        cache.complete("posts?limit=10", fresh, json!("post-mutation")).await;
        assert_eq!(cache.get("posts?limit=10").await, Some(json!("post-mutation")));
    }

    #[tokio::test]
    async fn clear_fences_in_flight_fetches_too() {
        let cache = QueryCache::new();

        let ticket = cache.begin();
        cache.clear().await;
        cache.complete("posts", ticket, json!("stale")).await;

        assert_eq!(cache.get("posts").await, None);
    }
}
