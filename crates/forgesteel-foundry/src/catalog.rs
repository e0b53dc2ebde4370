//! Reference catalog of compendium entries.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::record::RecordExt;

/// Compendium entries keyed by id, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, Value>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON object keyed by id, or an array of entries.
    ///
    /// Array entries are keyed by `system._dsid`, then `_id`, then `name`;
    /// entries with none of these are skipped.
    pub fn from_value(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Object(map) => map.into_iter().collect(),
            Value::Array(list) => {
                let mut entries = IndexMap::new();
                for entry in list {
                    match entry_key(&entry) {
                        Some(key) => {
                            entries.insert(key, entry);
                        }
                        None => tracing::warn!("catalog entry without id or name skipped"),
                    }
                }
                entries
            }
            other => {
                return Err(ConvertError::Catalog(format!(
                    "expected an object or array of entries, found {}",
                    match other {
                        Value::Null => "null",
                        Value::Bool(_) => "a boolean",
                        Value::Number(_) => "a number",
                        _ => "a string",
                    }
                )));
            }
        };

        Ok(Self { entries })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;

        let catalog = Self::from_value(value)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn entry_key(entry: &Value) -> Option<String> {
    entry
        .path(&["system", "_dsid"])
        .and_then(Value::as_str)
        .or_else(|| entry.str_field("_id"))
        .or_else(|| entry.str_field("name"))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_catalog() {
        let catalog = Catalog::from_value(json!({
            "catch-breath": {"name": "Catch Breath", "type": "ability", "system": {"_dsid": "catch-breath"}}
        }))
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("catch-breath"));
        assert_eq!(catalog.get("catch-breath").unwrap()["name"], "Catch Breath");
    }

    #[test]
    fn test_array_catalog_keys() {
        let catalog = Catalog::from_value(json!([
            {"name": "Catch Breath", "system": {"_dsid": "catch-breath"}},
            {"_id": "abc123", "name": "Memonek"},
            {"name": "Elementalist"},
            {"type": "orphan"}
        ]))
        .unwrap();

        let keys: Vec<_> = catalog.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["catch-breath", "abc123", "Elementalist"]);
    }

    #[test]
    fn test_rejects_scalars() {
        assert!(matches!(
            Catalog::from_value(json!("packs")),
            Err(ConvertError::Catalog(_))
        ));
    }
}
