//! Not Found View

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <p>"There is nothing at this address."</p>
            <A href="/">"Back to list"</A>
        </div>
    }
}
