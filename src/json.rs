//! Helpers for loosely-typed JSON values (server-supplied parameters,
//! tactics payloads) decoded into `serde_json::Value`.

use serde_json::Value;

/// Extract a list of strings from a decoded JSON value.
///
/// Returns `None` unless `value` is an array whose elements are all strings.
/// An empty array yields `Some(vec![])`.
pub fn get_string_slice(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}
