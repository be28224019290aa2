//! The document model produced by the builder

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything extracted from one document.
///
/// - `globals`: code to run once, ahead of every example
/// - `examples`: one entry per collected code block, in source order
/// - `definitions`: named snippets available to `use` directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub globals: String,
    pub examples: Vec<String>,
    pub definitions: BTreeMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the document yields neither globals nor examples
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.examples.is_empty()
    }

    pub fn definition(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }
}
