//! Todo List Component
//!
//! Loads `["todos"]` and renders loading, error, or one row per todo.

use leptos::prelude::*;
use query_cache::use_query;

use crate::api::TodoApi;
use crate::components::{ErrorIndicator, LoadingIndicator, TodoItem};
use crate::context::use_app_context;
use crate::likes::todos_key;
use crate::models::TodoId;
use crate::view_model::{ListView, TodoRow};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();

    let query = use_query(ctx.todos, todos_key, move |_| {
        let api = ctx.api();
        async move { api.list_todos().await }
    });

    // Ids with a like request in flight
    let pending_likes = RwSignal::new(Vec::<TodoId>::new());

    Effect::new(move |_| {
        query.state.with(|state| {
            if let Some(err) = state.error() {
                log::error!("[TODOS] failed to load list: {}", err);
            } else if let Some(todos) = state.data() {
                log::debug!("[TODOS] showing {} todos", todos.len());
            }
        });
    });

    let list_view = Memo::new(move |_| query.state.with(ListView::from_state));

    view! {
        <section class="todo-list-page" class:refreshing=move || query.is_fetching.get()>
            {move || match list_view.get() {
                ListView::Loading => view! { <LoadingIndicator /> }.into_any(),
                ListView::Failed(message) => view! { <ErrorIndicator message=message /> }.into_any(),
                ListView::Rows(rows) => view! {
                    <ul class="todo-list" style="list-style: none; width: 250px;">
                        <For
                            each=move || rows.clone()
                            key=|row: &TodoRow| (row.id.clone(), row.liked, row.title.clone())
                            children=move |row| view! {
                                <TodoItem row=row pending_likes=pending_likes />
                            }
                        />
                    </ul>
                }.into_any(),
            }}
        </section>
    }
}
