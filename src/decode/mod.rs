//! Response envelope decoding
//!
//! Every feed endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "<collectionKey>": [ item, item, ... ] }
//! ```
//!
//! where the collection key varies by feed kind (`topics`, `replies`,
//! `posts`, `users`, `activities`). This module turns that envelope into an
//! ordered item list or a typed failure. A `success: false` body is an
//! application failure; a well-formed JSON body without the expected shape
//! is a decode failure. Both drive the controller to the same `Errored`
//! state.

use crate::error::{Error, Result};
use serde_json::Value;

/// Extract the item list from a feed response envelope.
///
/// Items keep their response order. The collection key must hold an array;
/// the `success` flag must be present and a boolean.
pub fn extract_items(body: &Value, collection_key: &str, resource: &str) -> Result<Vec<Value>> {
    let success = body
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| Error::decode("envelope is missing a boolean 'success' field"))?;

    if !success {
        return Err(Error::app_failure(resource));
    }

    let items = body
        .get(collection_key)
        .ok_or_else(|| Error::MissingCollection {
            collection_key: collection_key.to_string(),
        })?;

    match items {
        Value::Array(items) => Ok(items.clone()),
        _ => Err(Error::decode(format!(
            "collection '{collection_key}' is not an array"
        ))),
    }
}
