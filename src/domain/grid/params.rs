//! Raw request parameters

use serde_json::{Map, Value};

/// Parameters submitted with a request, before any validation.
///
/// Values stay loosely typed: a `filter` parameter may arrive as an object
/// (`filter[role]=admin`) or as a plain string, and the validators decide
/// what to make of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded query-string pairs.
    ///
    /// `name[key]=value` pairs are collected into an object under `name`.
    /// A repeated name keeps the last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Map::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = Value::String(value.into());
            match split_bracket_key(key) {
                Some((name, "")) => {
                    map.insert(name.to_string(), value);
                }
                Some((name, inner)) => {
                    let entry = map
                        .entry(name.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !entry.is_object() {
                        *entry = Value::Object(Map::new());
                    }
                    if let Value::Object(obj) = entry {
                        obj.insert(inner.to_string(), value);
                    }
                }
                None => {
                    map.insert(key.to_string(), value);
                }
            }
        }
        Self(map)
    }

    /// Build from a JSON body. Anything but an object yields no parameters.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Keep only the named parameters.
    pub fn only(&self, names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .filter_map(|name| self.0.get(*name).map(|v| (name.to_string(), v.clone())))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// `filter[role]` → `("filter", "role")`, `tags[]` → `("tags", "")`
fn split_bracket_key(key: &str) -> Option<(&str, &str)> {
    let (name, rest) = key.split_once('[')?;
    let inner = rest.strip_suffix(']')?;
    if name.is_empty() {
        return None;
    }
    Some((name, inner))
}
