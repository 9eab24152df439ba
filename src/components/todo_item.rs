//! Todo Item Component
//!
//! One row of the todo list: title, details button, like toggle.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use query_cache::MutationStatus;

use crate::components::LikeIcon;
use crate::context::use_app_context;
use crate::models::TodoId;
use crate::view_model::TodoRow;

/// A single todo row
///
/// `pending_likes` lives in the list so it survives the row being rebuilt
/// when the optimistic flip lands.
#[component]
pub fn TodoItem(row: TodoRow, pending_likes: RwSignal<Vec<TodoId>>) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let TodoRow { id, title, liked, detail_href, icon } = row;

    let on_toggle = {
        let id = id.clone();
        Callback::new(move |_: ()| {
            let tracked = id.clone();
            // The list may be gone by the time this settles
            ctx.toggle_like(id.clone(), liked, move |status| match status {
                MutationStatus::Pending => {
                    pending_likes.try_update(|ids| ids.push(tracked.clone()));
                }
                s if s.is_settled() => {
                    pending_likes.try_update(|ids| {
                        if let Some(pos) = ids.iter().position(|i| i == &tracked) {
                            ids.remove(pos);
                        }
                    });
                }
                _ => {}
            });
        })
    };

    let pending = Signal::derive(move || pending_likes.with(|ids| ids.contains(&id)));

    view! {
        <li
            class="todo-item"
            style="border: 1px solid black; padding: 10px; margin-bottom: 10px;"
        >
            <h3>{title}</h3>
            <div class="todo-actions" style="display: flex; justify-content: space-between;">
                <button
                    class="detail-btn"
                    on:click=move |_| navigate(&detail_href, Default::default())
                >
                    "View details"
                </button>
                <LikeIcon variant=icon on_toggle=on_toggle pending=pending />
            </div>
        </li>
    }
}
