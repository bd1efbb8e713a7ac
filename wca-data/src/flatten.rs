//! Dotted key-path view over a JSON document.
//!
//! The official person endpoint returns a nested document; consumers look
//! values up by path, e.g. `personal_records.333.single.world_rank`. Objects
//! contribute their keys and arrays their indices as path segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON document flattened into `path → leaf value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    entries: BTreeMap<String, Value>,
}

impl FlatRecord {
    /// Flatten `value` using `.` as the separator.
    ///
    /// Empty objects and arrays produce no entries. A scalar root is stored
    /// under the empty path.
    pub fn from_value(value: &Value) -> Self {
        let mut entries = BTreeMap::new();
        flatten_into(value, String::new(), &mut entries);
        Self { entries }
    }

    /// Raw leaf value at `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    /// String leaf at `path`. Non-string leaves yield `None`.
    pub fn str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Signed integer leaf at `path`.
    pub fn i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    /// Unsigned integer leaf at `path`.
    pub fn u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(Value::as_u64)
    }

    /// Unsigned integer leaf at `path`, or 0.
    pub fn count(&self, path: &str) -> u64 {
        self.u64(path).unwrap_or(0)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no leaves were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All leaf paths, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn flatten_into(value: &Value, prefix: String, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(v, join_path(&prefix, k), out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(v, join_path(&prefix, &i.to_string()), out);
            }
        }
        leaf => {
            out.insert(prefix, leaf.clone());
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}
