//! Optimistic Mutations
//!
//! Cancel reads, snapshot, apply locally, send, roll back on error, invalidate.

use std::fmt::Display;
use std::future::Future;

use crate::cache::QueryStore;
use crate::key::QueryKey;
use crate::state::MutationStatus;

/// Run one optimistic mutation against the cached data at `key`.
///
/// `apply` edits the cached copy before `request` is polled. If the request
/// fails, the cache is restored to the exact pre-mutation snapshot. Either
/// way `key` (and everything under it) is invalidated once settled.
/// `on_status` observes `Pending` and then `Success` or `Error`.
pub async fn run_optimistic<T, S, F, Fut, R, E>(
    store: &S,
    key: &QueryKey,
    apply: F,
    request: Fut,
    mut on_status: impl FnMut(MutationStatus<E>),
) -> Result<R, E>
where
    S: QueryStore<T>,
    F: FnOnce(&mut T),
    Fut: Future<Output = Result<R, E>>,
    E: Clone + Display,
{
    // A read landing after the edit would clobber it
    store.cancel(key);
    let snapshot = store.get_data(key);
    let applied = store.update_data(key, apply);
    log::debug!("[QUERY] optimistic edit on {} (applied: {})", key, applied);
    on_status(MutationStatus::Pending);

    let result = request.await;

    match &result {
        Ok(_) => on_status(MutationStatus::Success),
        Err(err) => {
            log::error!("[QUERY] mutation on {} failed: {}", key, err);
            if let Some(previous) = snapshot {
                store.set_data(key, previous);
            }
            on_status(MutationStatus::Error(err.clone()));
        }
    }

    store.invalidate(key);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::QueryCache;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn key() -> QueryKey {
        QueryKey::root("todos")
    }

    fn seeded() -> RefCell<QueryCache<Vec<bool>, String>> {
        let cache = RefCell::new(QueryCache::new());
        cache.borrow_mut().set_data(&key(), vec![false, true]);
        cache
    }

    #[test]
    fn test_edit_is_visible_before_request_resolves() {
        let cache = seeded();
        let result: Result<(), String> = block_on(run_optimistic(
            &cache,
            &key(),
            |v: &mut Vec<bool>| v[0] = !v[0],
            async {
                // Still inside the request: the optimistic edit must be in place
                assert_eq!(cache.borrow().get_data(&key()), Some(vec![true, true]));
                Ok(())
            },
            |_| {},
        ));

        assert!(result.is_ok());
        assert_eq!(cache.borrow().get_data(&key()), Some(vec![true, true]));
        assert!(cache.borrow().is_stale(&key()));
    }

    #[test]
    fn test_failure_restores_snapshot() {
        let cache = seeded();
        let result: Result<(), String> = block_on(run_optimistic(
            &cache,
            &key(),
            |v: &mut Vec<bool>| v[1] = !v[1],
            async { Err("offline".to_string()) },
            |_| {},
        ));

        assert_eq!(result, Err("offline".to_string()));
        assert_eq!(cache.borrow().get_data(&key()), Some(vec![false, true]));
        assert!(cache.borrow().is_stale(&key()));
    }

    #[test]
    fn test_status_transitions() {
        let cache = seeded();
        let seen = RefCell::new(Vec::new());

        let _: Result<(), String> = block_on(run_optimistic(
            &cache,
            &key(),
            |v: &mut Vec<bool>| v[0] = true,
            async { Err("nope".to_string()) },
            |s| seen.borrow_mut().push(s),
        ));

        assert_eq!(
            *seen.borrow(),
            vec![MutationStatus::Pending, MutationStatus::Error("nope".to_string())]
        );
    }

    #[test]
    fn test_in_flight_read_is_cancelled() {
        let cache = seeded();
        let read = cache.borrow_mut().begin_fetch(&key());

        let _: Result<(), String> = block_on(run_optimistic(
            &cache,
            &key(),
            |v: &mut Vec<bool>| v[0] = true,
            async { Ok(()) },
            |_| {},
        ));

        // The read started before the mutation answers late with old data
        assert!(!cache.borrow_mut().complete_fetch(&read, Ok(vec![false, false])));
        assert_eq!(cache.borrow().get_data(&key()), Some(vec![true, true]));
    }

    #[test]
    fn test_empty_cache_stays_empty_on_failure() {
        let cache: RefCell<QueryCache<Vec<bool>, String>> = RefCell::new(QueryCache::new());
        let _: Result<(), String> = block_on(run_optimistic(
            &cache,
            &key(),
            |v: &mut Vec<bool>| v.push(true),
            async { Err("x".to_string()) },
            |_| {},
        ));
        assert_eq!(cache.borrow().get_data(&key()), None);
    }
}
