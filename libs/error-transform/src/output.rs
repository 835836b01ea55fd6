use serde::Serialize;
use serde_json::{Map, Value};

use crate::fields::FieldMap;

/// Result of reshaping an error tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransformedErrors {
    /// Deduplicated, joined messages.
    Message(String),
    /// A preserved sequence.
    List(Vec<TransformedErrors>),
    /// A preserved mapping, keys in input order.
    Fields(FieldMap<TransformedErrors>),
}

impl TransformedErrors {
    pub fn as_message(&self) -> Option<&str> {
        match self {
            TransformedErrors::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&FieldMap<TransformedErrors>> {
        match self {
            TransformedErrors::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a direct child field.
    pub fn get(&self, key: &str) -> Option<&TransformedErrors> {
        self.as_fields().and_then(|fields| fields.get(key))
    }

    /// Renders the result as a JSON value, keeping field order.
    pub fn to_value(&self) -> Value {
        match self {
            TransformedErrors::Message(message) => Value::String(message.clone()),
            TransformedErrors::List(items) => {
                Value::Array(items.iter().map(TransformedErrors::to_value).collect())
            }
            TransformedErrors::Fields(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (key, item) in fields.iter() {
                    map.insert(key.to_string(), item.to_value());
                }
                Value::Object(map)
            }
        }
    }
}

impl From<TransformedErrors> for Value {
    fn from(errors: TransformedErrors) -> Self {
        match errors {
            TransformedErrors::Message(message) => Value::String(message),
            TransformedErrors::List(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            TransformedErrors::Fields(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect(),
            ),
        }
    }
}
