use form_errors_transform::ErrorNode;
use serde_json::{json, Map, Value};
use tracing_subscriber::{fmt, EnvFilter};

// Re-export external crates needed by benches
pub use form_errors_transform;
pub use serde_json;

const MESSAGES: &[&str] = &[
    "This field is required",
    "Only numeric characters are allowed",
    "Ensure this field has no more than 100 characters",
    "Enter a valid URL",
    "Only alphanumeric characters are allowed",
];

/// Installs a compact subscriber once; later calls are ignored.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Pre-parsed payload plus the fields whose nesting is preserved.
pub struct TransformBenchFixture {
    pub payload: Value,
    pub node: ErrorNode,
    pub preserve_nested: Vec<String>,
}

impl TransformBenchFixture {
    pub fn new(payload: Value, preserve_nested: &[&str]) -> Self {
        let node = ErrorNode::from_value(&payload).expect("fixture payload is an error tree");
        Self {
            payload,
            node,
            preserve_nested: preserve_nested.iter().map(|field| field.to_string()).collect(),
        }
    }

    /// One flat message list per field, with repeated messages.
    pub fn wide(fields: usize) -> Self {
        let mut map = Map::new();
        for index in 0..fields {
            map.insert(format!("field_{index}"), message_list(index, 4));
        }
        Self::new(Value::Object(map), &[])
    }

    /// A single preserved field nested `depth` mappings deep.
    pub fn deep(depth: usize) -> Self {
        let mut value = message_list(depth, 3);
        for level in (0..depth).rev() {
            let mut map = Map::new();
            map.insert(format!("level_{level}"), value);
            value = Value::Object(map);
        }
        Self::new(json!({ "nested": value }), &["nested"])
    }

    /// A list of row objects, mostly empty, as returned for formsets.
    pub fn formset(rows: usize, preserve: bool) -> Self {
        let items: Vec<Value> = (0..rows)
            .map(|row| {
                if row % 3 == 0 {
                    json!({
                        "non_field_errors": message_list(row, 2),
                        "quantity": message_list(row + 1, 1)
                    })
                } else {
                    json!({})
                }
            })
            .collect();
        let preserve_nested: &[&str] = if preserve { &["rows"] } else { &[] };
        Self::new(json!({ "rows": items }), preserve_nested)
    }
}

fn message_list(seed: usize, len: usize) -> Value {
    Value::Array(
        (0..len)
            .map(|offset| Value::String(MESSAGES[(seed + offset / 2) % MESSAGES.len()].to_string()))
            .collect(),
    )
}
