//! Like Icon Component
//!
//! Filled or outlined heart. Clickable when `on_toggle` is given.

use leptos::prelude::*;

use crate::view_model::LikeIconVariant;

#[component]
pub fn LikeIcon(
    variant: LikeIconVariant,
    #[prop(optional)] on_toggle: Option<Callback<()>>,
    #[prop(into, default = Signal::stored(false))] pending: Signal<bool>,
) -> impl IntoView {
    let class = move || {
        let mut c = String::from(variant.class());
        if on_toggle.is_some() {
            c.push_str(" clickable");
        }
        if pending.get() {
            c.push_str(" pending");
        }
        c
    };
    let style = if on_toggle.is_some() {
        "cursor: pointer;"
    } else {
        ""
    };

    view! {
        <span
            class=class
            style=style
            role=on_toggle.map(|_| "button")
            title=variant.label()
            aria-label=variant.label()
            aria-pressed=(variant == LikeIconVariant::Filled).to_string()
            on:click=move |ev| {
                if let Some(toggle) = on_toggle {
                    ev.stop_propagation();
                    toggle.run(());
                }
            }
        >
            {variant.glyph()}
        </span>
    }
}
