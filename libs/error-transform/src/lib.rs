//! Reshapes nested API validation errors into display strings.
//!
//! An API reports validation failures as a tree: field names map to lists of
//! messages, nested objects, or lists of nested objects. This crate parses
//! such a payload into an [`ErrorNode`] tree and collapses it so each field
//! carries one deduplicated message such as `"This field is required."`.
//! Selected top-level fields can keep their nested structure, in which case
//! only the innermost lists of messages are collapsed.

pub mod config;
pub mod error;
pub mod fields;
pub mod joiner;
pub mod node;
pub mod output;
mod path;
pub mod transformer;

pub use config::{TransformConfig, DEFAULT_MAX_DEPTH};
pub use error::TransformError;
pub use fields::FieldMap;
pub use joiner::{concat_unique_errors, MESSAGE_SEPARATOR, MESSAGE_TERMINATOR};
pub use node::{ErrorFields, ErrorNode};
pub use output::TransformedErrors;
pub use transformer::{
    flatten, transform_errors, transform_errors_default, transform_json, transform_nested_errors,
    ErrorTransformer,
};
