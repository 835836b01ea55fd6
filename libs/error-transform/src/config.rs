use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Deepest nesting accepted before giving up on a payload.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings for [`crate::ErrorTransformer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Top-level fields whose structure is kept instead of flattened.
    pub preserve_nested: BTreeSet<String>,
    /// Deeper nesting under a preserved field fails with `MaxDepthExceeded`.
    pub max_depth: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            preserve_nested: BTreeSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TransformConfig {
    pub fn with_preserve_nested<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserve_nested.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn preserves(&self, field: &str) -> bool {
        self.preserve_nested.contains(field)
    }
}
