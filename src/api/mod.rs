//! Todo API
//!
//! Bindings to the remote todo REST API, behind the `TodoApi` trait.

mod error;
mod todos;

use async_trait::async_trait;

use crate::models::{Todo, TodoId};

pub use error::ApiError;
pub use todos::{encode_segment, HttpTodoApi};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operations on todos
#[async_trait(?Send)]
pub trait TodoApi {
    /// `GET /todos`
    async fn list_todos(&self) -> ApiResult<Vec<Todo>>;

    /// `GET /todos/{id}`
    async fn get_todo(&self, id: &TodoId) -> ApiResult<Todo>;

    /// `PATCH /todos/{id}` with `{ "liked": liked }`
    async fn set_liked(&self, id: &TodoId, liked: bool) -> ApiResult<Todo>;
}
