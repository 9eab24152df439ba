//! Query Cache
//!
//! Key-addressed cache for remote data with cancellable fetches,
//! prefix invalidation and optimistic mutations with rollback.
//! `QueryCache` is the plain core; `QueryClient` and `use_query` bind it to Leptos.

mod cache;
mod client;
mod key;
mod mutation;
mod state;

pub use cache::{QueryCache, QueryStore};
pub use client::{use_query, use_query_when, QueryClient, QueryResult};
pub use key::QueryKey;
pub use mutation::run_optimistic;
pub use state::{FetchTicket, MutationStatus, QueryState};
