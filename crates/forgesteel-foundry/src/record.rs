//! Schema-less record access and JSON persistence.
//!
//! Both the Forgesteel export and the Foundry actor are handled as plain
//! `serde_json::Value` trees. Lookups through [`RecordExt`] return `None` (or
//! an empty slice) for absent keys and wrong shapes instead of failing.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{ConvertError, Result};

/// Permissive accessors over a JSON record.
pub trait RecordExt {
    /// Value stored under `key`, if this is an object that has it.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Follow a fixed key path, one object level per key.
    fn path(&self, keys: &[&str]) -> Option<&Value>;

    /// String stored under `key`.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// Array stored under `key`, or an empty slice.
    fn items(&self, key: &str) -> &[Value];

    /// Whether `key` is present at all, even with a null value.
    fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

impl RecordExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn path(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(self, |current, key| current.field(key))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    fn items(&self, key: &str) -> &[Value] {
        self.field(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Load a JSON record from disk.
///
/// Forgesteel exports (`.ds-hero`) are plain JSON, so any extension works.
pub fn load_record(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let record: Value = serde_json::from_reader(reader)?;

    tracing::debug!(path = %path.display(), "loaded record");
    Ok(record)
}

/// Write a record as pretty-printed UTF-8 JSON, creating parent directories.
pub fn write_record(path: impl AsRef<Path>, record: &Value) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ConvertError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        ConvertError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record).map_err(|e| {
        ConvertError::Persistence(format!("Failed to serialize record: {}", e))
    })?;
    writer.flush().map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "wrote record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_access_is_permissive() {
        let record = json!({"name": "Quelialis", "class": {"level": 3}});

        assert_eq!(record.str_field("name"), Some("Quelialis"));
        assert_eq!(record.path(&["class", "level"]), Some(&json!(3)));
        assert!(record.path(&["class", "missing", "deeper"]).is_none());
        assert!(record.field("name").unwrap().field("anything").is_none());
        assert!(json!(42).field("name").is_none());
    }

    #[test]
    fn test_items_defaults_to_empty() {
        let record = json!({"items": [{"name": "a"}], "notes": "text"});

        assert_eq!(record.items("items").len(), 1);
        assert!(record.items("notes").is_empty());
        assert!(record.items("absent").is_empty());
    }

    #[test]
    fn test_has_field_sees_null() {
        let record = json!({"level": null});
        assert!(record.has_field("level"));
        assert!(!record.has_field("class"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("actor.json");
        let record = json!({"name": "VÀLM", "type": "hero"});

        write_record(&path, &record).unwrap();
        let loaded = load_record(&path).unwrap();

        assert_eq!(loaded, record);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"name\": \"VÀLM\""));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_record("/nonexistent/hero.ds-hero").unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
