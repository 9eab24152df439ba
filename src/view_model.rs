//! View Model
//!
//! Pure rendering decisions for the todo views, kept apart from the DOM.

use query_cache::QueryState;

use crate::api::{encode_segment, ApiError};
use crate::models::{Todo, TodoId};

/// Heart icon variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeIconVariant {
    Filled,
    Outlined,
}

impl LikeIconVariant {
    pub fn for_liked(liked: bool) -> Self {
        if liked {
            LikeIconVariant::Filled
        } else {
            LikeIconVariant::Outlined
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            LikeIconVariant::Filled => "♥",
            LikeIconVariant::Outlined => "♡",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            LikeIconVariant::Filled => "like-icon filled",
            LikeIconVariant::Outlined => "like-icon outlined",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LikeIconVariant::Filled => "Unlike",
            LikeIconVariant::Outlined => "Like",
        }
    }
}

/// Client-side route of a todo's detail view
pub fn detail_href(id: &TodoId) -> String {
    format!("/detail/{}", encode_segment(id.as_str()))
}

/// Todo id from the `:id` route parameter.
///
/// The router hands over the segment already unescaped, so it is only trimmed.
pub fn route_todo_id(param: &str) -> Option<TodoId> {
    let id = param.trim();
    (!id.is_empty()).then(|| TodoId::new(id))
}

/// One rendered list row
#[derive(Clone, Debug, PartialEq)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    pub liked: bool,
    pub detail_href: String,
    pub icon: LikeIconVariant,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            liked: todo.liked,
            detail_href: detail_href(&todo.id),
            icon: LikeIconVariant::for_liked(todo.liked),
        }
    }
}

/// What the list shows: exactly one of loading, error, or rows
#[derive(Clone, Debug, PartialEq)]
pub enum ListView {
    Loading,
    Failed(String),
    Rows(Vec<TodoRow>),
}

impl ListView {
    pub fn from_state(state: &QueryState<Vec<Todo>, ApiError>) -> Self {
        match state {
            QueryState::Pending => ListView::Loading,
            QueryState::Error(err) => ListView::Failed(error_message(err)),
            QueryState::Success(todos) => ListView::Rows(todos.iter().map(TodoRow::from).collect()),
        }
    }
}

/// What the detail view shows
#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    NotFound,
    Loading,
    Failed(String),
    Ready(Todo),
}

impl DetailView {
    /// Prefer the copy in the cached list; fall back to the single-item query
    pub fn resolve(
        id: Option<&TodoId>,
        list: &QueryState<Vec<Todo>, ApiError>,
        detail: &QueryState<Todo, ApiError>,
    ) -> Self {
        let Some(id) = id else {
            return DetailView::NotFound;
        };
        if let Some(todo) = find_cached(list, id) {
            return DetailView::Ready(todo);
        }
        match detail {
            QueryState::Pending => DetailView::Loading,
            QueryState::Error(ApiError::Status { status: 404, .. }) => DetailView::NotFound,
            QueryState::Error(err) => DetailView::Failed(error_message(err)),
            QueryState::Success(todo) => DetailView::Ready(todo.clone()),
        }
    }
}

/// The todo with `id` from a loaded list, if present
pub fn find_cached(list: &QueryState<Vec<Todo>, ApiError>, id: &TodoId) -> Option<Todo> {
    list.data()?.iter().find(|t| &t.id == id).cloned()
}

/// Text of the error indicator
pub fn error_message(err: &ApiError) -> String {
    format!("Something went wrong: {}", err)
}
