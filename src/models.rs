//! Frontend Models
//!
//! Data structures matching the remote todo API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Todo identifier.
///
/// Back-ends hand these out as numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TodoId(n.to_string()),
            RawId::Text(s) => TodoId(s),
        })
    }
}

/// Todo item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub liked: bool,
}

/// Flip `liked` on the todo with `id`; other items are untouched
pub fn toggle_liked(todos: &mut [Todo], id: &TodoId) {
    if let Some(todo) = todos.iter_mut().find(|t| &t.id == id) {
        todo.liked = !todo.liked;
    }
}
