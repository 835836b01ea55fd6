use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::TransformConfig;
use crate::fields::FieldMap;
use crate::joiner::concat_unique_errors;
use crate::node::{ErrorFields, ErrorNode};
use crate::output::TransformedErrors;
use crate::path::Path;
use crate::TransformError;

/// Reshapes API validation errors into display strings.
#[derive(Debug, Clone, Default)]
pub struct ErrorTransformer {
    config: TransformConfig,
}

impl ErrorTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transforms every top-level field.
    ///
    /// Fields listed in [`TransformConfig::preserve_nested`] keep their
    /// structure; every other field collapses into one joined message built
    /// from all of its nested messages.
    pub fn transform(&self, errors: &ErrorFields) -> Result<TransformedErrors, TransformError> {
        let root = Path::Root;
        let mut output = FieldMap::with_capacity(errors.len());
        let mut nested_count = 0;

        for (key, value) in errors.iter() {
            let path = root.field(key);
            let transformed = if self.config.preserves(key) {
                nested_count += 1;
                self.transform_nested(value, &path, 0)?
            } else {
                TransformedErrors::Message(self.flatten_and_join(value, &path)?)
            };
            debug!(field = %key, nested = self.config.preserves(key), "Transformed field errors");
            output.push(key, transformed);
        }

        debug!(
            "Transformed {} fields ({} kept nested)",
            output.len(),
            nested_count
        );

        Ok(TransformedErrors::Fields(output))
    }

    /// Like [`ErrorTransformer::transform`] for a node that must be a mapping.
    pub fn transform_node(&self, node: &ErrorNode) -> Result<TransformedErrors, TransformError> {
        match node {
            ErrorNode::Fields(fields) => self.transform(fields),
            _ => {
                warn!("Top-level error payload is not a mapping of fields");
                Err(TransformError::InvalidShape {
                    path: Path::Root.to_string(),
                })
            }
        }
    }

    /// Converts a parsed JSON payload, transforms it and renders the result.
    pub fn transform_json(&self, payload: &Value) -> Result<Value, TransformError> {
        let node = ErrorNode::from_value(payload)?;
        self.transform_node(&node).map(|result| result.to_value())
    }

    /// Keeps the structure of `node`, collapsing only its leaf-error-lists.
    pub fn transform_nested_errors(
        &self,
        node: &ErrorNode,
    ) -> Result<TransformedErrors, TransformError> {
        self.transform_nested(node, &Path::Root, 0)
    }

    fn transform_nested(
        &self,
        node: &ErrorNode,
        path: &Path<'_>,
        depth: usize,
    ) -> Result<TransformedErrors, TransformError> {
        if depth > self.config.max_depth {
            return Err(TransformError::MaxDepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        match node {
            ErrorNode::Leaf(_) => {
                warn!(path = %path, "Expected a list or mapping of errors, found a message");
                Err(TransformError::InvalidShape {
                    path: path.to_string(),
                })
            }
            ErrorNode::Branch(items) if node.is_leaf_error_list() => {
                trace!(path = %path, count = items.len(), "Collapsing leaf error list");
                Ok(TransformedErrors::Message(concat_unique_errors(
                    items.iter().filter_map(ErrorNode::as_leaf),
                )))
            }
            ErrorNode::Branch(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.transform_nested(item, &path.index(index), depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(TransformedErrors::List),
            ErrorNode::Fields(fields) => {
                let mut output = FieldMap::with_capacity(fields.len());
                for (key, item) in fields.iter() {
                    output.push(key, self.transform_nested(item, &path.field(key), depth + 1)?);
                }
                Ok(TransformedErrors::Fields(output))
            }
        }
    }

    fn flatten_and_join(&self, node: &ErrorNode, path: &Path<'_>) -> Result<String, TransformError> {
        if let ErrorNode::Leaf(_) = node {
            warn!(path = %path, "Cannot flatten a bare message");
            return Err(TransformError::InvalidShape {
                path: path.to_string(),
            });
        }

        Ok(concat_unique_errors(flatten(node)))
    }
}

/// Every message under `node`, depth-first and left to right.
///
/// Shape is discarded entirely; empty sequences and mappings contribute
/// nothing. A bare leaf yields itself.
pub fn flatten(node: &ErrorNode) -> Vec<&str> {
    let mut messages = Vec::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        match current {
            ErrorNode::Leaf(message) => messages.push(message.as_str()),
            ErrorNode::Branch(items) => stack.extend(items.iter().rev()),
            ErrorNode::Fields(fields) => {
                let values: Vec<&ErrorNode> = fields.values().collect();
                stack.extend(values.into_iter().rev());
            }
        }
    }

    messages
}

/// Transforms `errors`, keeping the structure of the fields named in
/// `preserve_nested` and collapsing every other field into one message.
///
/// # Example
/// ```
/// use form_errors_transform::{transform_errors, ErrorNode};
/// use serde_json::json;
///
/// let payload = json!({
///     "name": ["This field is required"],
///     "url": { "site": { "code": ["This site code is invalid"] } }
/// });
/// let node = ErrorNode::from_value(&payload).unwrap();
/// let result = transform_errors(node.as_fields().unwrap(), &["url"]).unwrap();
///
/// assert_eq!(
///     result.to_value(),
///     json!({
///         "name": "This field is required.",
///         "url": { "site": { "code": "This site code is invalid." } }
///     })
/// );
/// ```
pub fn transform_errors<S: AsRef<str>>(
    errors: &ErrorFields,
    preserve_nested: &[S],
) -> Result<TransformedErrors, TransformError> {
    transformer_for(preserve_nested).transform(errors)
}

/// [`transform_errors`] with nothing preserved: every field is flattened.
pub fn transform_errors_default(errors: &ErrorFields) -> Result<TransformedErrors, TransformError> {
    ErrorTransformer::default().transform(errors)
}

/// Keeps the structure of `node`, collapsing each list of plain messages.
///
/// Fails with [`TransformError::InvalidShape`] when a message sits where a
/// list or mapping is required.
pub fn transform_nested_errors(node: &ErrorNode) -> Result<TransformedErrors, TransformError> {
    ErrorTransformer::default().transform_nested_errors(node)
}

/// JSON in, JSON out variant of [`transform_errors`].
pub fn transform_json<S: AsRef<str>>(
    payload: &Value,
    preserve_nested: &[S],
) -> Result<Value, TransformError> {
    transformer_for(preserve_nested).transform_json(payload)
}

fn transformer_for<S: AsRef<str>>(preserve_nested: &[S]) -> ErrorTransformer {
    let config = TransformConfig::default()
        .with_preserve_nested(preserve_nested.iter().map(|field| field.as_ref().to_owned()));
    ErrorTransformer::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> ErrorNode {
        ErrorNode::from_value(&value).unwrap()
    }

    #[test]
    fn test_nested_leaf_list_matches_joiner() {
        let list = ErrorNode::messages(["b", "a", "b"]);
        let result = transform_nested_errors(&list).unwrap();
        assert_eq!(
            result,
            TransformedErrors::Message(concat_unique_errors(["b", "a", "b"]))
        );
    }

    #[test]
    fn test_nested_empty_branch_becomes_terminator() {
        let result = transform_nested_errors(&ErrorNode::Branch(vec![])).unwrap();
        assert_eq!(result, TransformedErrors::Message(".".to_string()));
    }

    #[test]
    fn test_nested_empty_fields_are_preserved() {
        let result = transform_nested_errors(&node(json!([{}, {}, {"a": ["x"]}]))).unwrap();
        assert_eq!(result.to_value(), json!([{}, {}, {"a": "x."}]));
    }

    #[test]
    fn test_nested_bare_leaf_is_invalid_shape() {
        let result = transform_nested_errors(&ErrorNode::leaf("oops"));
        assert_eq!(
            result.unwrap_err(),
            TransformError::InvalidShape {
                path: "$".to_string()
            }
        );
    }

    #[test]
    fn test_nested_mixed_branch_reports_message_position() {
        let result = transform_nested_errors(&node(json!({"site": ["oops", {"id": ["x"]}]})));
        assert_eq!(
            result.unwrap_err(),
            TransformError::InvalidShape {
                path: "$.site[0]".to_string()
            }
        );
    }

    #[test]
    fn test_flatten_is_depth_first_left_to_right() {
        let tree = node(json!([
            "a",
            {"x": ["b", ["c"]], "y": "d"},
            [],
            [["e"]]
        ]));
        assert_eq!(flatten(&tree), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_flatten_bare_top_level_field_is_invalid_shape() {
        let errors = node(json!({"name": "required"}));
        let result = transform_errors_default(errors.as_fields().unwrap());
        assert_eq!(
            result.unwrap_err(),
            TransformError::InvalidShape {
                path: "$.name".to_string()
            }
        );
    }

    #[test]
    fn test_max_depth_exceeded() {
        let transformer = ErrorTransformer::new(TransformConfig::default().with_max_depth(2));
        let deep = node(json!([[[["too deep"]]]]));
        let result = transformer.transform_nested_errors(&deep);
        assert_eq!(
            result.unwrap_err(),
            TransformError::MaxDepthExceeded { max_depth: 2 }
        );
    }

    #[test]
    fn test_preserved_field_uses_same_depth_budget_as_direct_call() {
        let transformer = ErrorTransformer::new(
            TransformConfig::default()
                .with_preserve_nested(["rows"])
                .with_max_depth(2),
        );
        let rows = node(json!([[["x"]]]));
        let errors = node(json!({ "rows": [[["x"]]] }));

        let direct = transformer.transform_nested_errors(&rows).unwrap();
        let via_field = transformer.transform(errors.as_fields().unwrap()).unwrap();
        assert_eq!(via_field.get("rows"), Some(&direct));
    }

    #[test]
    fn test_max_depth_exceeded_under_preserved_field() {
        let transformer = ErrorTransformer::new(
            TransformConfig::default()
                .with_preserve_nested(["rows"])
                .with_max_depth(2),
        );
        let errors = node(json!({ "rows": [[[["too deep"]]]] }));

        let result = transformer.transform(errors.as_fields().unwrap());
        assert_eq!(
            result.unwrap_err(),
            TransformError::MaxDepthExceeded { max_depth: 2 }
        );
    }

    #[test]
    fn test_transform_node_requires_mapping() {
        let result = ErrorTransformer::default().transform_node(&ErrorNode::messages(["a"]));
        assert!(matches!(result, Err(TransformError::InvalidShape { path }) if path == "$"));
    }
}
