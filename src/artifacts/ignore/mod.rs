//! Ignore rules consulted before staging
//!
//! Pattern files are not interpreted here; the repository only needs a yes/no
//! answer per path. The built-in matcher keeps the repository's own directory
//! out of the index.

use std::path::Path;

/// Name of the directory holding repository state
pub const REPOSITORY_DIR: &str = ".jit";

pub trait IgnoreMatcher {
    /// `path` is relative to the repository root
    fn should_ignore(&self, path: &Path) -> bool;
}

/// Ignores any path with a component in the list
#[derive(Debug, Clone)]
pub struct IgnoredComponents {
    components: Vec<String>,
}

impl IgnoredComponents {
    pub fn new(components: Vec<String>) -> Self {
        IgnoredComponents { components }
    }
}

impl Default for IgnoredComponents {
    fn default() -> Self {
        Self::new(vec![REPOSITORY_DIR.to_string()])
    }
}

impl IgnoreMatcher for IgnoredComponents {
    fn should_ignore(&self, path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                self.components
                    .iter()
                    .any(|ignored| ignored == name_str.as_ref())
            } else {
                false
            }
        })
    }
}
