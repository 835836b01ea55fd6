use thiserror::Error;

/// Errors emitted while building or reshaping an error tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A string was found where a mapping or sequence must be traversed.
    #[error("Invalid shape at {path}: expected a list or mapping of errors, found a message")]
    InvalidShape { path: String },

    /// The payload holds a scalar that is not an error message.
    #[error("Unsupported {kind} value at {path}")]
    UnsupportedValue { path: String, kind: &'static str },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::InvalidJson(err.to_string())
    }
}
