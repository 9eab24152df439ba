//! Todo Likes App
//!
//! Root component: context providers and routes.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::api::HttpTodoApi;
use crate::components::{NotFound, TodoDetail, TodoList};
use crate::config::ApiConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_env();
    log::info!("[APP] using API at {}", config.base_url);

    // Provide context to all children
    provide_context(AppContext::new(HttpTodoApi::new(config)));

    view! {
        <Router>
            <main class="app-layout">
                <h1>"Todos"</h1>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=TodoList />
                    <Route path=path!("/detail/:id") view=TodoDetail />
                </Routes>
            </main>
        </Router>
    }
}
