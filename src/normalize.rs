//! Stamps the request-scoped `result_id` onto result items.
//!
//! Result-bearing collections are `results` and `response.results` (arrays of
//! items) as well as `sections` and `response.sections` (maps of section name
//! to an array of items). Only object items are touched.

use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// A collection an operation requires to be present in its response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Results,
    /// `results`, or a `redirect` when the term matched a redirect rule
    ResultsOrRedirect,
    Sections,
}

/// Copies the top-level `result_id` onto every item of every collection.
///
/// When `required` is set and the body carries no collection of that kind,
/// the body is rejected as malformed for `operation`.
pub fn normalize(
    mut body: Value,
    required: Option<Collection>,
    operation: &str,
) -> ClientResult<Value> {
    let root = body
        .as_object_mut()
        .ok_or_else(|| ClientError::malformed(operation))?;

    if let Some(required) = required {
        if !has_collection(root, required) {
            return Err(ClientError::malformed(operation));
        }
    }

    let result_id = match root.get("result_id") {
        Some(Value::String(id)) => Value::String(id.clone()),
        _ => return Ok(body),
    };

    stamp_collections(root, &result_id);
    if let Some(Value::Object(response)) = root.get_mut("response") {
        stamp_collections(response, &result_id);
    }

    Ok(body)
}

fn has_collection(root: &Map<String, Value>, collection: Collection) -> bool {
    let present = |map: &Map<String, Value>| match collection {
        Collection::Results => matches!(map.get("results"), Some(Value::Array(_))),
        Collection::ResultsOrRedirect => {
            matches!(map.get("results"), Some(Value::Array(_)))
                || matches!(map.get("redirect"), Some(Value::Object(_)))
        }
        Collection::Sections => matches!(map.get("sections"), Some(Value::Object(_))),
    };

    present(root)
        || matches!(root.get("response"), Some(Value::Object(response)) if present(response))
}

fn stamp_collections(map: &mut Map<String, Value>, result_id: &Value) {
    if let Some(Value::Array(items)) = map.get_mut("results") {
        stamp_items(items, result_id);
    }

    if let Some(Value::Object(sections)) = map.get_mut("sections") {
        for items in sections.values_mut() {
            if let Value::Array(items) = items {
                stamp_items(items, result_id);
            }
        }
    }
}

fn stamp_items(items: &mut [Value], result_id: &Value) {
    for item in items.iter_mut() {
        if let Value::Object(item) = item {
            item.insert("result_id".to_string(), result_id.clone());
        }
    }
}
