//! Status Indicators
//!
//! Loading and error placeholders shared by the list and detail views.

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="status loading" style="font-size: 36px;">"Loading..."</div>
    }
}

/// Error text, already formatted for display
#[component]
pub fn ErrorIndicator(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="status error" role="alert" style="font-size: 24px;">{message}</div>
    }
}
