//! Query Cache Core
//!
//! Synchronous, non-reactive cache keyed by `QueryKey`. The Leptos client
//! wraps this in a signal; tests use it directly.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::key::QueryKey;
use crate::state::{FetchTicket, QueryState};

#[derive(Clone, Debug)]
struct QueryEntry<T, E> {
    state: QueryState<T, E>,
    stale: bool,
    fetching: bool,
    generation: u64,
}

impl<T, E> Default for QueryEntry<T, E> {
    fn default() -> Self {
        Self {
            state: QueryState::Pending,
            stale: false,
            fetching: false,
            generation: 0,
        }
    }
}

/// Cache of query results of one data type
#[derive(Clone, Debug)]
pub struct QueryCache<T, E> {
    entries: HashMap<QueryKey, QueryEntry<T, E>>,
}

impl<T, E> Default for QueryCache<T, E> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T: Clone, E: Clone> QueryCache<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; `Pending` for unknown keys
    pub fn state(&self, key: &QueryKey) -> QueryState<T, E> {
        self.entries
            .get(key)
            .map(|e| e.state.clone())
            .unwrap_or(QueryState::Pending)
    }

    pub fn get_data(&self, key: &QueryKey) -> Option<T> {
        self.entries.get(key).and_then(|e| e.state.data().cloned())
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(false)
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.fetching).unwrap_or(false)
    }

    /// Whether an observer of `key` should start a fetch now.
    ///
    /// True for unknown keys, stale keys, and keys left `Pending` by a
    /// cancelled first load. Never true while a fetch is outstanding.
    /// Errors are not retried until invalidated.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(entry) if entry.fetching => false,
            Some(entry) => entry.stale || entry.state.is_pending(),
        }
    }

    /// Start a fetch for `key`, superseding any earlier ticket
    pub fn begin_fetch(&mut self, key: &QueryKey) -> FetchTicket {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.generation += 1;
        entry.fetching = true;
        FetchTicket {
            key: key.clone(),
            generation: entry.generation,
        }
    }

    /// Apply a fetch result if the ticket is still current.
    /// Returns false when the result was discarded.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: Result<T, E>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if !entry.fetching || entry.generation != ticket.generation {
            return false;
        }
        entry.fetching = false;
        match result {
            Ok(data) => {
                entry.state = QueryState::Success(data);
                entry.stale = false;
            }
            Err(err) => {
                entry.state = QueryState::Error(err);
                entry.stale = false;
            }
        }
        true
    }

    /// Cancel outstanding fetches for every key under `prefix`.
    /// Returns the number of fetches cancelled.
    ///
    /// Cancelled keys holding data are not refetched until invalidated again.
    pub fn cancel(&mut self, prefix: &QueryKey) -> usize {
        let mut cancelled = 0;
        for (key, entry) in self.entries.iter_mut() {
            if entry.fetching && key.starts_with(prefix) {
                entry.generation += 1;
                entry.fetching = false;
                entry.stale = false;
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Replace the data for `key` wholesale
    pub fn set_data(&mut self, key: &QueryKey, data: T) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.state = QueryState::Success(data);
    }

    /// Edit the data for `key` in place. No-op (returns false) without data.
    pub fn update_data<F: FnOnce(&mut T)>(&mut self, key: &QueryKey, f: F) -> bool {
        match self.entries.get_mut(key).map(|e| &mut e.state) {
            Some(QueryState::Success(data)) => {
                f(data);
                true
            }
            _ => false,
        }
    }

    /// Mark every key under `prefix` stale. Returns the number of keys marked.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut marked = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                marked += 1;
            }
        }
        marked
    }
}

/// Cache operations the mutation driver needs.
///
/// Implemented by the reactive `QueryClient` and by `RefCell<QueryCache>`.
pub trait QueryStore<T> {
    fn cancel(&self, prefix: &QueryKey);
    fn get_data(&self, key: &QueryKey) -> Option<T>;
    fn set_data(&self, key: &QueryKey, data: T);
    fn update_data<F: FnOnce(&mut T)>(&self, key: &QueryKey, f: F) -> bool;
    fn invalidate(&self, prefix: &QueryKey);
}

impl<T: Clone, E: Clone> QueryStore<T> for RefCell<QueryCache<T, E>> {
    fn cancel(&self, prefix: &QueryKey) {
        self.borrow_mut().cancel(prefix);
    }

    fn get_data(&self, key: &QueryKey) -> Option<T> {
        self.borrow().get_data(key)
    }

    fn set_data(&self, key: &QueryKey, data: T) {
        self.borrow_mut().set_data(key, data);
    }

    fn update_data<F: FnOnce(&mut T)>(&self, key: &QueryKey, f: F) -> bool {
        self.borrow_mut().update_data(key, f)
    }

    fn invalidate(&self, prefix: &QueryKey) {
        self.borrow_mut().invalidate(prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> QueryKey {
        QueryKey::root("todos")
    }

    #[test]
    fn test_unknown_key_is_pending() {
        let cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        assert!(cache.state(&key()).is_pending());
        assert!(cache.needs_fetch(&key()));
        assert_eq!(cache.get_data(&key()), None);
    }

    #[test]
    fn test_fetch_success_replaces_data() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();

        let ticket = cache.begin_fetch(&key());
        assert!(cache.is_fetching(&key()));
        assert!(!cache.needs_fetch(&key()));

        assert!(cache.complete_fetch(&ticket, Ok(vec![1, 2, 3])));
        assert_eq!(cache.get_data(&key()), Some(vec![1, 2, 3]));
        assert!(!cache.is_fetching(&key()));
        assert!(!cache.needs_fetch(&key()));

        cache.invalidate(&key());
        let ticket = cache.begin_fetch(&key());
        assert!(cache.complete_fetch(&ticket, Ok(vec![9])));
        assert_eq!(cache.get_data(&key()), Some(vec![9]));
        assert!(!cache.is_stale(&key()));
    }

    #[test]
    fn test_fetch_error_is_not_retried_until_invalidated() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        let ticket = cache.begin_fetch(&key());
        cache.complete_fetch(&ticket, Err("boom".to_string()));

        assert_eq!(cache.state(&key()), QueryState::Error("boom".to_string()));
        assert!(!cache.needs_fetch(&key()));

        cache.invalidate(&key());
        assert!(cache.needs_fetch(&key()));
    }

    #[test]
    fn test_cancelled_response_is_discarded() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        cache.set_data(&key(), vec![1]);

        let late = cache.begin_fetch(&key());
        assert_eq!(cache.cancel(&key()), 1);
        cache.update_data(&key(), |v| v.push(2));

        assert!(!cache.complete_fetch(&late, Ok(vec![100])));
        assert_eq!(cache.get_data(&key()), Some(vec![1, 2]));
    }

    #[test]
    fn test_superseded_ticket_is_discarded() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        let first = cache.begin_fetch(&key());
        let second = cache.begin_fetch(&key());

        assert!(cache.complete_fetch(&second, Ok(vec![2])));
        assert!(!cache.complete_fetch(&first, Ok(vec![1])));
        assert_eq!(cache.get_data(&key()), Some(vec![2]));
    }

    #[test]
    fn test_cancelled_refetch_waits_for_next_invalidation() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        cache.set_data(&key(), vec![1]);
        cache.invalidate(&key());
        cache.begin_fetch(&key());

        cache.cancel(&key());
        assert!(!cache.needs_fetch(&key()));

        cache.invalidate(&key());
        assert!(cache.needs_fetch(&key()));
    }

    #[test]
    fn test_cancelled_first_load_is_refetched() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        cache.begin_fetch(&key());
        cache.cancel(&key());
        assert!(cache.needs_fetch(&key()));
    }

    #[test]
    fn test_invalidate_matches_prefix() {
        let mut cache: QueryCache<u32, String> = QueryCache::new();
        let detail = key().child("3");
        cache.set_data(&key(), 1);
        cache.set_data(&detail, 3);
        cache.set_data(&QueryKey::root("users"), 5);

        assert_eq!(cache.invalidate(&key()), 2);
        assert!(cache.is_stale(&key()));
        assert!(cache.is_stale(&detail));
        assert!(!cache.is_stale(&QueryKey::root("users")));
    }

    #[test]
    fn test_update_without_data_is_noop() {
        let mut cache: QueryCache<Vec<u32>, String> = QueryCache::new();
        assert!(!cache.update_data(&key(), |v| v.push(1)));
        assert_eq!(cache.get_data(&key()), None);
    }
}
