use form_errors_transform::{ErrorTransformer, TransformConfig, TransformError};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let payload = json!({
        "email": ["Enter a valid email address", "This field is required", "Enter a valid email address"],
        "addresses": [
            {},
            { "zip": ["Unknown postal code"] }
        ],
        "profile": { "bio": ["Too long"], "links": [{ "url": ["Invalid URL"] }] }
    });

    let transformer =
        ErrorTransformer::new(TransformConfig::default().with_preserve_nested(["addresses"]));

    match transformer.transform_json(&payload) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(rendered) => println!("Display errors:\n{rendered}\n"),
            Err(err) => println!("Failed to render result: {err}"),
        },
        Err(err) => println!("Transformation unexpectedly failed: {err}"),
    }

    let malformed = json!({ "addresses": { "zip": "Unknown postal code" } });

    match transformer.transform_json(&malformed) {
        Ok(_) => println!("Malformed payload unexpectedly transformed"),
        Err(TransformError::InvalidShape { path }) => {
            println!("Invalid shape detected at {path}");
        }
        Err(err) => println!("Received different error: {err}"),
    }
}
