//! Query and Mutation State
//!
//! Status enums observed by views.

use crate::key::QueryKey;

/// Status of a cached query
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T, E> {
    /// Nothing loaded yet
    Pending,
    /// Last fetch failed
    Error(E),
    /// Data available
    Success(T),
}

impl<T, E> QueryState<T, E> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }
}

/// Lifecycle of one mutation
///
/// `Idle -> Pending -> Success | Error`. The optimistic edit is already
/// applied when `Pending` is reported; rollback is done before `Error`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MutationStatus<E> {
    #[default]
    Idle,
    Pending,
    Success,
    Error(E),
}

impl<E> MutationStatus<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, MutationStatus::Success | MutationStatus::Error(_))
    }
}

/// Token for one in-flight fetch.
///
/// Completing with a ticket whose generation is no longer current is a no-op,
/// so cancelled or superseded responses never reach the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub generation: u64,
}
