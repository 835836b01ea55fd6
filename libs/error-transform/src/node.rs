use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::fields::FieldMap;
use crate::path::Path;
use crate::TransformError;

/// Mapping node keyed by field name.
pub type ErrorFields = FieldMap<ErrorNode>;

/// A validation-error tree as returned by an API.
///
/// Built once from the parsed payload; every later decision is made by
/// matching on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorNode {
    /// A single error message.
    Leaf(String),
    /// An ordered sequence of nodes.
    Branch(Vec<ErrorNode>),
    /// Errors keyed by field name.
    Fields(ErrorFields),
}

impl ErrorNode {
    pub fn leaf(message: impl Into<String>) -> Self {
        ErrorNode::Leaf(message.into())
    }

    /// Builds a branch whose elements are all messages.
    pub fn messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorNode::Branch(messages.into_iter().map(ErrorNode::leaf).collect())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ErrorNode::Leaf(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&ErrorFields> {
        match self {
            ErrorNode::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// True for a branch that holds only messages, including the empty branch.
    pub fn is_leaf_error_list(&self) -> bool {
        match self {
            ErrorNode::Branch(items) => items.iter().all(|item| item.as_leaf().is_some()),
            _ => false,
        }
    }

    /// Converts a parsed JSON payload.
    ///
    /// Objects become [`ErrorNode::Fields`] (keeping key order), arrays become
    /// [`ErrorNode::Branch`] and strings become [`ErrorNode::Leaf`]. Any other
    /// scalar is rejected with [`TransformError::UnsupportedValue`].
    pub fn from_value(value: &Value) -> Result<Self, TransformError> {
        Self::convert(value, &Path::Root)
    }

    /// Parses raw JSON bytes into an error tree.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TransformError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    fn convert(value: &Value, path: &Path<'_>) -> Result<Self, TransformError> {
        match value {
            Value::String(message) => Ok(ErrorNode::Leaf(message.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Self::convert(item, &path.index(index)))
                .collect::<Result<Vec<_>, _>>()
                .map(ErrorNode::Branch),
            Value::Object(map) => {
                let mut fields = ErrorFields::with_capacity(map.len());
                for (key, item) in map {
                    fields.push(key.clone(), Self::convert(item, &path.field(key))?);
                }
                Ok(ErrorNode::Fields(fields))
            }
            other => {
                let kind = match other {
                    Value::Null => "null",
                    Value::Bool(_) => "boolean",
                    _ => "number",
                };
                warn!(path = %path, kind, "Rejecting non-string scalar in error payload");
                Err(TransformError::UnsupportedValue {
                    path: path.to_string(),
                    kind,
                })
            }
        }
    }
}

impl TryFrom<Value> for ErrorNode {
    type Error = TransformError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ErrorNode::from_value(&value)
    }
}

impl TryFrom<&Value> for ErrorNode {
    type Error = TransformError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        ErrorNode::from_value(value)
    }
}

impl<'de> Deserialize<'de> for ErrorNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ErrorNode::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_builds_tagged_tree() {
        let node = ErrorNode::from_value(&json!({
            "name": ["This field is required"],
            "url": { "site": { "code": ["Invalid"] } }
        }))
        .unwrap();

        let fields = node.as_fields().unwrap();
        assert_eq!(
            fields.get("name"),
            Some(&ErrorNode::messages(["This field is required"]))
        );
        let url = fields.get("url").unwrap().as_fields().unwrap();
        assert!(url.get("site").unwrap().as_fields().is_some());
    }

    #[test]
    fn test_from_value_keeps_key_order() {
        let node = ErrorNode::from_slice(br#"{"zeta": [], "alpha": [], "mid": []}"#).unwrap();
        let keys: Vec<&str> = node.as_fields().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_from_value_rejects_numbers_with_path() {
        let result = ErrorNode::from_value(&json!({ "age": ["ok", 42] }));
        assert_eq!(
            result.unwrap_err(),
            TransformError::UnsupportedValue {
                path: "$.age[1]".to_string(),
                kind: "number",
            }
        );
    }

    #[test]
    fn test_from_slice_rejects_malformed_json() {
        let result = ErrorNode::from_slice(b"{not json");
        assert!(matches!(result, Err(TransformError::InvalidJson(_))));
    }

    #[test]
    fn test_leaf_error_list_classification() {
        assert!(ErrorNode::messages(["a", "b"]).is_leaf_error_list());
        assert!(ErrorNode::Branch(vec![]).is_leaf_error_list());
        assert!(!ErrorNode::Branch(vec![ErrorNode::Fields(ErrorFields::new())]).is_leaf_error_list());
        assert!(!ErrorNode::Fields(ErrorFields::new()).is_leaf_error_list());
        assert!(!ErrorNode::leaf("a").is_leaf_error_list());
    }

    #[test]
    fn test_deserialize_and_serialize_round_trip_shape() {
        let node: ErrorNode = serde_json::from_str(r#"{"b": ["x"], "a": [{}]}"#).unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"b":["x"],"a":[{}]}"#);
    }
}
