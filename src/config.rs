//! API Configuration
//!
//! Resolves the base URL of the todo API.

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:4000";

/// Local storage key overriding the base URL at runtime
pub const API_BASE_STORAGE_KEY: &str = "todo_api_base";

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize(base_url.as_ref()),
        }
    }

    /// Local storage, then `TODO_API_BASE` at build time, then the default
    pub fn from_env() -> Self {
        Self::new(resolve_base(stored_base(), option_env!("TODO_API_BASE")))
    }

    /// Absolute URL for an API path like `/todos`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn resolve_base(stored: Option<String>, compiled: Option<&str>) -> String {
    stored
        .filter(|s| !s.trim().is_empty())
        .or_else(|| compiled.filter(|s| !s.trim().is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn stored_base() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(API_BASE_STORAGE_KEY).ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        assert_eq!(resolve_base(Some("http://a".into()), Some("http://b")), "http://a");
        assert_eq!(resolve_base(None, Some("http://b")), "http://b");
        assert_eq!(resolve_base(Some("  ".into()), None), DEFAULT_API_BASE);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig::new("http://api.test/v1/");
        assert_eq!(config.base_url, "http://api.test/v1");
        assert_eq!(config.url("/todos"), "http://api.test/v1/todos");
        assert_eq!(config.url("todos/3"), "http://api.test/v1/todos/3");
    }
}
