//! Todo Detail Component
//!
//! Route `/detail/:id`. Shows the cached copy from the list when there is
//! one, otherwise loads the single todo.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use query_cache::use_query_when;

use crate::api::TodoApi;
use crate::components::{ErrorIndicator, LikeIcon, LoadingIndicator, NotFound};
use crate::context::use_app_context;
use crate::likes::{todo_key, todos_key};
use crate::models::TodoId;
use crate::view_model::{find_cached, route_todo_id, DetailView, LikeIconVariant};

#[component]
pub fn TodoDetail() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();

    let todo_id = Memo::new(move |_| {
        params.with(|p| p.get("id")).as_deref().and_then(route_todo_id)
    });

    let list = Signal::derive(move || ctx.todos.state(&todos_key()));

    // Only hit the network when the list has no copy
    let needs_single = move || {
        todo_id.with(|id| match id {
            Some(id) => list.with(|l| find_cached(l, id).is_none()),
            None => false,
        })
    };

    let detail_key = move || match todo_id.get() {
        Some(id) => todo_key(&id),
        None => todos_key().child(""),
    };

    let detail = use_query_when(ctx.details, detail_key, needs_single, move |key| {
        let api = ctx.api();
        async move {
            let id = key.segments().last().cloned().unwrap_or_default();
            api.get_todo(&TodoId::new(id)).await
        }
    });

    let detail_view = Memo::new(move |_| {
        todo_id.with(|id| list.with(|l| detail.state.with(|d| DetailView::resolve(id.as_ref(), l, d))))
    });

    Effect::new(move |_| {
        if let DetailView::Failed(message) = detail_view.get() {
            log::error!("[TODOS] failed to load detail: {}", message);
        }
    });

    view! {
        <section class="todo-detail-page">
            {move || match detail_view.get() {
                DetailView::NotFound => view! { <NotFound /> }.into_any(),
                DetailView::Loading => view! { <LoadingIndicator /> }.into_any(),
                DetailView::Failed(message) => view! {
                    <ErrorIndicator message=message />
                    <A href="/">"Back to list"</A>
                }.into_any(),
                DetailView::Ready(todo) => view! {
                    <article class="todo-detail" style="border: 1px solid black; padding: 10px; width: 250px;">
                        <h2>{todo.title.clone()}</h2>
                        <p class="todo-id">{format!("#{}", todo.id)}</p>
                        <LikeIcon variant=LikeIconVariant::for_liked(todo.liked) />
                        <div class="todo-detail-nav">
                            <A href="/">"Back to list"</A>
                        </div>
                    </article>
                }.into_any(),
            }}
        </section>
    }
}
