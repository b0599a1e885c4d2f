//! Named JSON configuration documents.
//!
//! A [`Document`] pairs a parsed `serde_json::Value` with the name used in
//! error messages. The field accessors here are the only place JSON types get
//! checked, so every resolver reports mismatches the same way.

use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    name: String,
    root: Value,
}

impl Document {
    /// Opens and parses a JSON file. The document is named after the file.
    ///
    /// The file handle is dropped before returning, on success and on error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Opening configuration document {} at {}", name, path.display());

        let not_found = |source: io::Error| ConfigError::DocumentNotFound {
            document: name.clone(),
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(not_found)?;
        // Opening a directory succeeds on some platforms; reading it does not
        if file.metadata().map_err(not_found)?.is_dir() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path is a directory",
            )));
        }

        Self::from_reader(name, BufReader::new(file))
    }

    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self, ConfigError> {
        let name = name.into();
        match serde_json::from_reader(reader) {
            Ok(root) => Ok(Self { name, root }),
            Err(source) => Err(ConfigError::ParseError { document: name, source }),
        }
    }

    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        match serde_json::from_str(text) {
            Ok(root) => Ok(Self { name, root }),
            Err(source) => Err(ConfigError::ParseError { document: name, source }),
        }
    }

    /// Wraps an already-parsed value.
    pub fn from_value(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The top-level JSON object, or `TypeMismatch` on `(root)`.
    pub fn as_object(&self) -> Result<&Map<String, Value>, ConfigError> {
        expect_object(&self.name, "(root)", &self.root)
    }

    /// Reads a top-level string field.
    pub fn require_str(&self, field: &str) -> Result<&str, ConfigError> {
        require_str(&self.name, self.as_object()?, field)
    }
}

/// JSON type name used in `TypeMismatch` messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn expect_object<'a>(
    document: &str,
    field: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| ConfigError::TypeMismatch {
        document: document.to_string(),
        field: field.to_string(),
        expected: "an object",
        found: json_type_name(value),
    })
}

pub(crate) fn require_field<'a>(
    document: &str,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, ConfigError> {
    object.get(field).ok_or_else(|| ConfigError::MissingField {
        document: document.to_string(),
        field: field.to_string(),
    })
}

pub(crate) fn require_str<'a>(
    document: &str,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ConfigError> {
    let value = require_field(document, object, field)?;
    value.as_str().ok_or_else(|| ConfigError::TypeMismatch {
        document: document.to_string(),
        field: field.to_string(),
        expected: "a string",
        found: json_type_name(value),
    })
}

/// Like [`require_str`] but an absent field is `Ok(None)`.
pub(crate) fn optional_str<'a>(
    document: &str,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, ConfigError> {
    match object.get(field) {
        None => Ok(None),
        Some(_) => require_str(document, object, field).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorKind;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_names_document_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "database_type": "sqlite" }"#).unwrap();

        let doc = Document::open(&path).unwrap();
        assert_eq!(doc.name(), "settings.json");
        assert_eq!(doc.require_str("database_type").unwrap(), "sqlite");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::open(dir.path().join("settings.json")).unwrap_err();

        assert_eq!(err.kind(), ConfigErrorKind::DocumentNotFound);
        assert_eq!(err.document(), "settings.json");
    }

    #[test]
    fn test_open_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();

        let err = Document::open(&path).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::DocumentNotFound);
        assert_eq!(err.document(), "settings.json");
    }

    #[test]
    fn test_open_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ \"database_type\": ").unwrap();

        let err = Document::open(file.path()).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::ParseError);
    }

    #[test]
    fn test_parse_and_from_reader_agree() {
        let text = r#"{ "sqlite": { "path": "data", "name": "surf.db" } }"#;
        let parsed = Document::parse("databases.json", text).unwrap();
        let read = Document::from_reader("databases.json", text.as_bytes()).unwrap();
        assert_eq!(parsed, read);
    }

    #[test]
    fn test_require_str_type_mismatch() {
        let doc = Document::from_value("settings.json", json!({ "database_type": 3 }));
        match doc.require_str("database_type") {
            Err(ConfigError::TypeMismatch { field, expected, found, .. }) => {
                assert_eq!(field, "database_type");
                assert_eq!(expected, "a string");
                assert_eq!(found, "a number");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_root() {
        let doc = Document::from_value("settings.json", json!(["sqlite"]));
        let err = doc.require_str("database_type").unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("(root)"));
    }

    #[test]
    fn test_optional_str() {
        let value = json!({ "schema": "v1", "bad": false });
        let object = value.as_object().unwrap();

        assert_eq!(optional_str("doc", object, "schema").unwrap(), Some("v1"));
        assert_eq!(optional_str("doc", object, "missing").unwrap(), None);
        assert!(optional_str("doc", object, "bad").is_err());
    }
}
