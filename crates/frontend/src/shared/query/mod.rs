//! Кэш постраничных запросов.
//!
//! A [`QueryKey`] is the serialized parameter tuple of a request, so two
//! structurally equal tuples always address the same entry. [`QueryRegistry`]
//! is the key → entry map with subscriber counting and garbage collection;
//! [`client::InfiniteQueryClient`] wraps it in reactive state.

pub mod client;
pub mod infinite;

pub use client::{use_infinite_query, InfiniteQueryClient, InfiniteQueryHandle, PageFetcher};
pub use infinite::{FetchKind, FetchTicket, InfinitePage, InfiniteQuery, QueryStatus};

use serde::Serialize;
use std::collections::HashMap;

/// Настройки времени жизни записей кэша
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryClientConfig {
    /// Data older than this is reloaded when a view subscribes
    pub stale_time_ms: i64,
    /// Entries without subscribers are dropped after this long
    pub gc_time_ms: i64,
}

impl Default for QueryClientConfig {
    fn default() -> Self {
        Self {
            stale_time_ms: 10_000,
            gc_time_ms: 24 * 60 * 60 * 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    /// `namespace` separates unrelated queries that happen to share parameter shapes
    pub fn new<K: Serialize>(namespace: &str, params: &K) -> Self {
        let params = serde_json::to_string(params).unwrap_or_else(|e| {
            log::error!("query key for {} is not serializable: {}", namespace, e);
            String::new()
        });
        Self(format!("{}:{}", namespace, params))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct RegistryEntry<V> {
    value: V,
    subscribers: usize,
    /// Время ухода последнего подписчика
    idle_since: Option<i64>,
}

/// Key → entry map with subscriber counts
#[derive(Debug)]
pub struct QueryRegistry<V> {
    entries: HashMap<QueryKey, RegistryEntry<V>>,
}

impl<V> Default for QueryRegistry<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> QueryRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &QueryKey) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn subscribers(&self, key: &QueryKey) -> usize {
        self.entries.get(key).map(|e| e.subscribers).unwrap_or(0)
    }

    /// Adds a subscriber, creating the entry with `init` on first use
    pub fn subscribe(&mut self, key: QueryKey, init: impl FnOnce() -> V) -> &V {
        let entry = self.entries.entry(key).or_insert_with(|| RegistryEntry {
            value: init(),
            subscribers: 0,
            idle_since: None,
        });
        entry.subscribers += 1;
        entry.idle_since = None;
        &entry.value
    }

    pub fn unsubscribe(&mut self, key: &QueryKey, now: i64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.idle_since = Some(now);
            }
        }
    }

    /// Drops entries idle for at least `gc_time_ms`; returns the removed keys
    pub fn collect_garbage(&mut self, now: i64, gc_time_ms: i64) -> Vec<QueryKey> {
        let expired: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, e)| {
                e.subscribers == 0
                    && e.idle_since
                        .map(|since| now - since >= gc_time_ms)
                        .unwrap_or(false)
            })
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            self.entries.remove(key);
        }
        expired
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|e| &e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Params<'a> {
        status: &'a str,
        take: u32,
    }

    #[test]
    fn test_key_is_structural() {
        let a = QueryKey::new("orders", &Params { status: "ALL", take: 30 });
        let b = QueryKey::new("orders", &Params { status: "ALL", take: 30 });
        let c = QueryKey::new("orders", &Params { status: "REJECTED", take: 30 });
        let d = QueryKey::new("users", &Params { status: "ALL", take: 30 });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_subscribe_creates_once() {
        let mut registry = QueryRegistry::new();
        let key = QueryKey::new("k", &1);
        let mut created = 0;
        registry.subscribe(key.clone(), || {
            created += 1;
            10
        });
        registry.subscribe(key.clone(), || {
            created += 1;
            20
        });
        assert_eq!(created, 1);
        assert_eq!(registry.get(&key), Some(&10));
        assert_eq!(registry.subscribers(&key), 2);
    }

    #[test]
    fn test_gc_only_idle_entries() {
        let mut registry = QueryRegistry::new();
        let idle = QueryKey::new("k", &"idle");
        let active = QueryKey::new("k", &"active");
        registry.subscribe(idle.clone(), || ());
        registry.subscribe(active.clone(), || ());
        registry.unsubscribe(&idle, 1_000);

        assert!(registry.collect_garbage(1_500, 1_000).is_empty());
        assert_eq!(registry.collect_garbage(2_000, 1_000), vec![idle.clone()]);
        assert_eq!(registry.get(&idle), None);
        assert!(registry.get(&active).is_some());
    }

    #[test]
    fn test_resubscribe_cancels_gc() {
        let mut registry = QueryRegistry::new();
        let key = QueryKey::new("k", &0);
        registry.subscribe(key.clone(), || ());
        registry.unsubscribe(&key, 0);
        registry.subscribe(key.clone(), || ());
        assert!(registry.collect_garbage(i64::MAX / 2, 1).is_empty());
    }
}
