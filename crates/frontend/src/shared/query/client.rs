//! Reactive side of the page cache.
//!
//! Entries are `ArcRwSignal`s so they outlive the component that created
//! them; the registry itself lives in a `StoredValue` owned by the app root.

use super::infinite::{FetchTicket, InfinitePage, InfiniteQuery};
use super::{QueryClientConfig, QueryKey, QueryRegistry};
use crate::shared::date_utils::now_ms;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use std::fmt::Display;

type Entry<P, E> = ArcRwSignal<InfiniteQuery<P, E>>;

/// Loads one page for the given parameters and cursor
pub type PageFetcher<K, P, E> = fn(K, Option<String>) -> LocalBoxFuture<'static, Result<P, E>>;

/// Кэш бесконечных списков, общий для всего приложения
pub struct InfiniteQueryClient<P, E>
where
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    config: QueryClientConfig,
    registry: StoredValue<QueryRegistry<Entry<P, E>>>,
}

impl<P, E> Clone for InfiniteQueryClient<P, E>
where
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, E> Copy for InfiniteQueryClient<P, E>
where
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
}

impl<P, E> InfiniteQueryClient<P, E>
where
    P: InfinitePage + Send + Sync + 'static,
    E: Display + Send + Sync + 'static,
{
    pub fn new(config: QueryClientConfig) -> Self {
        Self {
            config,
            registry: StoredValue::new(QueryRegistry::new()),
        }
    }

    pub fn config(&self) -> QueryClientConfig {
        self.config
    }

    fn subscribe(&self, key: &QueryKey) -> Entry<P, E> {
        let entry = self
            .registry
            .try_update_value(|r| {
                r.subscribe(key.clone(), || ArcRwSignal::new(InfiniteQuery::new()))
                    .clone()
            })
            .unwrap_or_else(|| ArcRwSignal::new(InfiniteQuery::new()));
        let (now, stale_time) = (now_ms(), self.config.stale_time_ms);
        entry.update(|q| q.mark_stale_if_older(now, stale_time));
        log::debug!("query subscribe {}", key);
        entry
    }

    fn unsubscribe(&self, key: &QueryKey) {
        let (now, gc_time) = (now_ms(), self.config.gc_time_ms);
        self.registry.try_update_value(|r| {
            r.unsubscribe(key, now);
            for dropped in r.collect_garbage(now, gc_time) {
                log::debug!("query gc {}", dropped);
            }
        });
    }

    /// Reload one entry; entries nobody watches reload on next subscription
    pub fn invalidate(&self, key: &QueryKey) {
        let entry = self
            .registry
            .try_with_value(|r| r.get(key).cloned())
            .flatten();
        if let Some(entry) = entry {
            log::debug!("query invalidate {}", key);
            entry.update(|q| q.invalidate());
        }
    }

    pub fn invalidate_all(&self) {
        let entries: Vec<Entry<P, E>> = self
            .registry
            .try_with_value(|r| r.values().cloned().collect())
            .unwrap_or_default();
        log::debug!("query invalidate all ({} entries)", entries.len());
        for entry in entries {
            entry.update(|q| q.invalidate());
        }
    }
}

#[derive(Clone)]
struct Subscription<K, P, E> {
    key: QueryKey,
    params: K,
    entry: Entry<P, E>,
}

/// Handle of one view onto the cache; follows its parameter signal across keys
pub struct InfiniteQueryHandle<K, P, E>
where
    K: Send + Sync + 'static,
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    client: InfiniteQueryClient<P, E>,
    slot: RwSignal<Option<Subscription<K, P, E>>>,
    fetcher: PageFetcher<K, P, E>,
}

impl<K, P, E> Clone for InfiniteQueryHandle<K, P, E>
where
    K: Send + Sync + 'static,
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, P, E> Copy for InfiniteQueryHandle<K, P, E>
where
    K: Send + Sync + 'static,
    P: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
}

fn run_fetch<K, P, E>(entry: Entry<P, E>, params: K, ticket: FetchTicket, fetcher: PageFetcher<K, P, E>)
where
    K: Clone + Send + Sync + 'static,
    P: InfinitePage + Send + Sync + 'static,
    E: Display + Send + Sync + 'static,
{
    spawn_local(async move {
        let result = fetcher(params.clone(), ticket.cursor.clone()).await;
        if let Err(e) = &result {
            log::warn!("page fetch failed: {}", e);
        }
        let mut next = None;
        entry.update(|q| next = q.complete(&ticket, result, now_ms()));
        if let Some(next) = next {
            run_fetch(entry, params, next, fetcher);
        }
    });
}

/// Subscribe the current component to the entry addressed by `params`.
///
/// Switching `params` moves the subscription to another key; the previous
/// entry stays cached until garbage collection.
pub fn use_infinite_query<K, P, E>(
    client: InfiniteQueryClient<P, E>,
    namespace: &'static str,
    params: Signal<K>,
    fetcher: PageFetcher<K, P, E>,
) -> InfiniteQueryHandle<K, P, E>
where
    K: Serialize + Clone + PartialEq + Send + Sync + 'static,
    P: InfinitePage + Clone + Send + Sync + 'static,
    E: Display + Clone + Send + Sync + 'static,
{
    let slot: RwSignal<Option<Subscription<K, P, E>>> = RwSignal::new(None);
    let current_key: ArcRwSignal<Option<QueryKey>> = ArcRwSignal::new(None);

    {
        let current_key = current_key.clone();
        Effect::new(move |_| {
            let params = params.get();
            let key = QueryKey::new(namespace, &params);
            let previous = current_key.get_untracked();
            if previous.as_ref() == Some(&key) {
                return;
            }
            let entry = client.subscribe(&key);
            if let Some(previous) = previous {
                client.unsubscribe(&previous);
            }
            current_key.set(Some(key.clone()));
            slot.set(Some(Subscription { key, params, entry }));
        });
    }

    // Первая загрузка и перезагрузка после инвалидации
    Effect::new(move |_| {
        let Some(sub) = slot.get() else { return };
        if !sub.entry.with(|q| q.needs_fetch()) {
            return;
        }
        let mut ticket = None;
        sub.entry.update(|q| ticket = q.begin_refetch());
        if let Some(ticket) = ticket {
            log::debug!("query fetch {} (generation {})", sub.key, ticket.generation);
            run_fetch(sub.entry, sub.params, ticket, fetcher);
        }
    });

    on_cleanup(move || {
        if let Some(key) = current_key.get_untracked() {
            client.unsubscribe(&key);
        }
    });

    InfiniteQueryHandle {
        client,
        slot,
        fetcher,
    }
}

impl<K, P, E> InfiniteQueryHandle<K, P, E>
where
    K: Clone + Send + Sync + 'static,
    P: InfinitePage + Clone + Send + Sync + 'static,
    E: Display + Clone + Send + Sync + 'static,
{
    /// Tracked read of the current entry; `None` before the first subscription
    pub fn with<R>(&self, f: impl FnOnce(&InfiniteQuery<P, E>) -> R) -> Option<R> {
        self.slot
            .with(|slot| slot.as_ref().map(|sub| sub.entry.with(f)))
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.slot
            .with_untracked(|slot| slot.as_ref().map(|sub| sub.key.clone()))
    }

    pub fn is_pending(&self) -> bool {
        self.with(|q| q.is_pending()).unwrap_or(true)
    }

    pub fn is_fetching(&self) -> bool {
        self.with(|q| q.is_fetching()).unwrap_or(false)
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.with(|q| q.is_fetching_next_page()).unwrap_or(false)
    }

    pub fn has_next_page(&self) -> bool {
        self.with(|q| q.has_next_page()).unwrap_or(false)
    }

    pub fn error(&self) -> Option<E> {
        self.with(|q| q.error().cloned()).flatten()
    }

    /// Single-flight: ignored while the entry is fetching or exhausted
    pub fn fetch_next_page(&self) {
        let Some(sub) = self.slot.get_untracked() else {
            return;
        };
        let mut ticket = None;
        sub.entry.update(|q| ticket = q.begin_next());
        match ticket {
            Some(ticket) => {
                log::debug!("query next page {} cursor {:?}", sub.key, ticket.cursor);
                run_fetch(sub.entry, sub.params, ticket, self.fetcher);
            }
            None => log::debug!("query next page skipped for {}", sub.key),
        }
    }

    /// Invalidate only the entry this handle currently shows
    pub fn invalidate(&self) {
        if let Some(key) = self.key() {
            self.client.invalidate(&key);
        }
    }
}
