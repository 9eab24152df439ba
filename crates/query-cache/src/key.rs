//! Query Keys
//!
//! Hierarchical keys addressing cache entries, e.g. `["todos"]` or `["todos", "3"]`.

use std::fmt;

/// Ordered list of key segments
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Single-segment key
    pub fn root(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Extend this key with one more segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True when `prefix` matches the leading segments of this key.
    /// A key is its own prefix.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let todos = QueryKey::root("todos");
        let one = todos.child("3");

        assert!(one.starts_with(&todos));
        assert!(todos.starts_with(&todos));
        assert!(!todos.starts_with(&one));
        assert!(!QueryKey::root("todosx").starts_with(&todos));
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryKey::root("todos").child("7").to_string(), "[todos, 7]");
    }
}
