//! UI Components
//!
//! Leptos components for the todo views.

mod like_icon;
mod not_found;
mod status;
mod todo_detail;
mod todo_item;
mod todo_list;

pub use like_icon::LikeIcon;
pub use not_found::NotFound;
pub use status::{ErrorIndicator, LoadingIndicator};
pub use todo_detail::TodoDetail;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
