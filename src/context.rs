//! Application Context
//!
//! Shared API client and query caches provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use query_cache::MutationStatus;

use crate::api::{ApiError, HttpTodoApi};
use crate::likes::{self, todos_key, TodoDetailClient, TodoListClient};
use crate::models::TodoId;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<HttpTodoApi>,
    /// Todo list cache (`["todos"]`)
    pub todos: TodoListClient,
    /// Single todo cache (`["todos", id]`)
    pub details: TodoDetailClient,
}

impl AppContext {
    pub fn new(api: HttpTodoApi) -> Self {
        Self {
            api: StoredValue::new(api),
            todos: TodoListClient::new(),
            details: TodoDetailClient::new(),
        }
    }

    pub fn api(&self) -> HttpTodoApi {
        self.api.get_value()
    }

    /// Start an optimistic like toggle in the background.
    /// Failures are rolled back and logged, never surfaced.
    pub fn toggle_like(
        &self,
        id: TodoId,
        current_liked: bool,
        on_status: impl FnMut(MutationStatus<ApiError>) + 'static,
    ) {
        let ctx = *self;
        spawn_local(async move {
            let api = ctx.api();
            let result = likes::toggle_like(&ctx.todos, &api, id.clone(), current_liked, on_status).await;
            // Single-item copies share the list prefix
            ctx.details.invalidate(&todos_key());
            if let Ok(todo) = result {
                log::info!("[LIKE] todo {} saved, liked={}", todo.id, todo.liked);
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
