//! HTTP Todo Client
//!
//! `TodoApi` over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, ApiResult, TodoApi};
use crate::config::ApiConfig;
use crate::models::{Todo, TodoId};

/// Characters left unescaped in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// `/todos/{id}` with the id percent-encoded
pub fn todo_path(id: &TodoId) -> String {
    format!("/todos/{}", encode_segment(id.as_str()))
}

#[derive(Serialize)]
struct LikedPatch {
    liked: bool,
}

#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    config: ApiConfig,
}

impl HttpTodoApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpTodoApi {
    async fn list_todos(&self) -> ApiResult<Vec<Todo>> {
        let response = Request::get(&self.config.url("/todos"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn get_todo(&self, id: &TodoId) -> ApiResult<Todo> {
        let response = Request::get(&self.config.url(&todo_path(id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn set_liked(&self, id: &TodoId, liked: bool) -> ApiResult<Todo> {
        let response = Request::patch(&self.config.url(&todo_path(id)))
            .json(&LikedPatch { liked })
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_reply(response.status(), &response.status_text(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_path_encodes_segment() {
        assert_eq!(todo_path(&TodoId::new("42")), "/todos/42");
        assert_eq!(todo_path(&TodoId::new("a b/c")), "/todos/a%20b%2Fc");
        assert_eq!(todo_path(&TodoId::new("x-1_y.z")), "/todos/x-1_y.z");
    }

    #[test]
    fn test_liked_patch_body() {
        let body = serde_json::to_string(&LikedPatch { liked: true }).unwrap();
        assert_eq!(body, r#"{"liked":true}"#);
    }
}
