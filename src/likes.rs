//! Like Toggle
//!
//! Optimistic `liked` flip on the cached todo list.

use query_cache::{run_optimistic, MutationStatus, QueryClient, QueryKey, QueryStore};

use crate::api::{ApiError, ApiResult, TodoApi};
use crate::models::{toggle_liked, Todo, TodoId};

/// Cache of the todo list, keyed `["todos"]`
pub type TodoListClient = QueryClient<Vec<Todo>, ApiError>;

/// Cache of single todos, keyed `["todos", id]`
pub type TodoDetailClient = QueryClient<Todo, ApiError>;

pub fn todos_key() -> QueryKey {
    QueryKey::root("todos")
}

pub fn todo_key(id: &TodoId) -> QueryKey {
    todos_key().child(id.as_str())
}

/// Flip `liked` for `id` on the server, showing the flip immediately.
///
/// In-flight list reads are cancelled first. A failed request restores the
/// list exactly as it was. The list is invalidated once the request settles.
pub async fn toggle_like<S, A>(
    store: &S,
    api: &A,
    id: TodoId,
    current_liked: bool,
    on_status: impl FnMut(MutationStatus<ApiError>),
) -> ApiResult<Todo>
where
    S: QueryStore<Vec<Todo>>,
    A: TodoApi + ?Sized,
{
    log::info!("[LIKE] todo {} -> liked={}", id, !current_liked);
    let target = id.clone();
    run_optimistic(
        store,
        &todos_key(),
        move |todos: &mut Vec<Todo>| toggle_liked(todos, &target),
        api.set_liked(&id, !current_liked),
        on_status,
    )
    .await
}
