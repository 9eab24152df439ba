//! Leptos Query Client
//!
//! Reactive wrapper over `QueryCache`. Views read state through signals;
//! fetches run on `spawn_local` and can be aborted by `cancel`.

use std::collections::HashMap;
use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::{QueryCache, QueryStore};
use crate::key::QueryKey;
use crate::state::QueryState;

/// Copyable handle to a reactive query cache
pub struct QueryClient<T: Send + Sync + 'static, E: Send + Sync + 'static> {
    cache: RwSignal<QueryCache<T, E>>,
    /// Abort handle of the outstanding fetch per key, tagged with its generation
    aborts: StoredValue<HashMap<QueryKey, (u64, AbortHandle)>>,
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Clone for QueryClient<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Copy for QueryClient<T, E> {}

impl<T, E> QueryClient<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            cache: RwSignal::new(QueryCache::new()),
            aborts: StoredValue::new(HashMap::new()),
        }
    }

    /// Tracked read of the state at `key`
    pub fn state(&self, key: &QueryKey) -> QueryState<T, E> {
        self.cache.with(|c| c.state(key))
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.cache.with(|c| c.is_fetching(key))
    }

    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        self.cache.with(|c| c.needs_fetch(key))
    }

    /// Run `request` and store its result under `key`, unless cancelled or
    /// superseded first.
    pub fn fetch<Fut>(&self, key: QueryKey, request: Fut)
    where
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let Some(ticket) = self.cache.try_update(|c| c.begin_fetch(&key)) else {
            return;
        };
        let (handle, registration) = AbortHandle::new_pair();
        self.aborts.try_update_value(|aborts| {
            if let Some((_, previous)) = aborts.insert(key.clone(), (ticket.generation, handle)) {
                previous.abort();
            }
        });

        let client = *self;
        spawn_local(async move {
            match Abortable::new(request, registration).await {
                Ok(result) => {
                    let applied = client
                        .cache
                        .try_update(|c| c.complete_fetch(&ticket, result))
                        .unwrap_or(false);
                    if !applied {
                        log::debug!("[QUERY] discarded stale response for {}", ticket.key);
                    }
                }
                Err(_) => log::debug!("[QUERY] fetch for {} aborted", ticket.key),
            }
            client.aborts.try_update_value(|aborts| {
                if aborts.get(&ticket.key).map(|(g, _)| *g) == Some(ticket.generation) {
                    aborts.remove(&ticket.key);
                }
            });
        });
    }

    /// Cancel and abort outstanding fetches under `prefix`
    pub fn cancel(&self, prefix: &QueryKey) {
        let cancelled = self.cache.try_update(|c| c.cancel(prefix)).unwrap_or(0);
        self.aborts.try_update_value(|aborts| {
            aborts.retain(|key, (_, handle)| {
                if key.starts_with(prefix) {
                    handle.abort();
                    false
                } else {
                    true
                }
            });
        });
        if cancelled > 0 {
            log::debug!("[QUERY] cancelled {} fetch(es) under {}", cancelled, prefix);
        }
    }

    /// Mark everything under `prefix` stale; observers refetch
    pub fn invalidate(&self, prefix: &QueryKey) {
        let marked = self.cache.try_update(|c| c.invalidate(prefix)).unwrap_or(0);
        log::debug!("[QUERY] invalidated {} key(s) under {}", marked, prefix);
    }

    /// Untracked read of the data at `key`
    pub fn peek_data(&self, key: &QueryKey) -> Option<T> {
        self.cache.with_untracked(|c| c.get_data(key))
    }
}

impl<T, E> Default for QueryClient<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> QueryStore<T> for QueryClient<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn cancel(&self, prefix: &QueryKey) {
        QueryClient::cancel(self, prefix);
    }

    fn get_data(&self, key: &QueryKey) -> Option<T> {
        self.peek_data(key)
    }

    fn set_data(&self, key: &QueryKey, data: T) {
        self.cache.try_update(|c| c.set_data(key, data));
    }

    fn update_data<F: FnOnce(&mut T)>(&self, key: &QueryKey, f: F) -> bool {
        self.cache.try_update(|c| c.update_data(key, f)).unwrap_or(false)
    }

    fn invalidate(&self, prefix: &QueryKey) {
        QueryClient::invalidate(self, prefix);
    }
}

/// Reactive view of one query
pub struct QueryResult<T: Send + Sync + 'static, E: Send + Sync + 'static> {
    pub state: Signal<QueryState<T, E>>,
    pub is_fetching: Signal<bool>,
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Clone for QueryResult<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Copy for QueryResult<T, E> {}

/// Observe the query at `key()`, fetching with `fetcher` on first use and
/// again whenever the key is invalidated.
pub fn use_query<T, E, K, F, Fut>(client: QueryClient<T, E>, key: K, fetcher: F) -> QueryResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    K: Fn() -> QueryKey + Clone + Send + Sync + 'static,
    F: Fn(QueryKey) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_query_when(client, key, || true, fetcher)
}

/// Like `use_query`, but only fetches while `enabled()` is true
pub fn use_query_when<T, E, K, G, F, Fut>(
    client: QueryClient<T, E>,
    key: K,
    enabled: G,
    fetcher: F,
) -> QueryResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    K: Fn() -> QueryKey + Clone + Send + Sync + 'static,
    G: Fn() -> bool + 'static,
    F: Fn(QueryKey) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let effect_key = key.clone();
    Effect::new(move |_| {
        if !enabled() {
            return;
        }
        let key = effect_key();
        if client.needs_fetch(&key) {
            log::debug!("[QUERY] fetching {}", key);
            client.fetch(key.clone(), fetcher(key));
        }
    });

    let state_key = key.clone();
    QueryResult {
        state: Signal::derive(move || client.state(&state_key())),
        is_fetching: Signal::derive(move || client.is_fetching(&key())),
    }
}
