//! Storage backend descriptors.

use crate::document::{expect_object, optional_str, require_str};
use crate::error::ConfigError;
use crate::paths::lexically_normal;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Backend identifiers the plugin knows about.
///
/// The backends catalog may define identifiers outside this set; those
/// resolve as [`BackendKind::Other`] and are treated as server-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Sqlite,
    MySql,
    Postgres,
    Other,
}

impl BackendKind {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "sqlite" => BackendKind::Sqlite,
            "mysql" => BackendKind::MySql,
            "postgres" => BackendKind::Postgres,
            _ => BackendKind::Other,
        }
    }

    /// File-based backends must name a schema in their catalog entry.
    pub fn is_file_based(self) -> bool {
        matches!(self, BackendKind::Sqlite)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::MySql => "mysql",
            BackendKind::Postgres => "postgres",
            BackendKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// One entry of the backends catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Storage directory, relative to the plugin directory
    pub path: String,
    /// File or resource name inside `path`
    pub name: String,
    /// Schema reference; always present for file-based backends
    pub schema: Option<String>,
}

impl BackendDescriptor {
    /// Reads a descriptor out of a catalog entry.
    ///
    /// `document` labels the entry in errors and `identifier` is the key the
    /// entry was found under. Fields are checked in the order `path`, `name`,
    /// `schema`.
    pub fn from_entry(
        document: &str,
        identifier: &str,
        entry: &Value,
    ) -> Result<Self, ConfigError> {
        let object = expect_object(document, identifier, entry)?;
        let label = format!("{document}[\"{identifier}\"]");

        let path = require_str(&label, object, "path")?;
        let name = require_str(&label, object, "name")?;
        let schema = if BackendKind::from_identifier(identifier).is_file_based() {
            Some(require_str(&label, object, "schema")?)
        } else {
            optional_str(&label, object, "schema")?
        };

        Ok(Self {
            path: path.to_string(),
            name: name.to_string(),
            schema: schema.map(str::to_string),
        })
    }
}

/// The outcome of resolution: which backend is active and where its data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBackend {
    pub backend_type: String,
    /// `plugin_dir / path / name`, joined but not normalized
    pub absolute_path: PathBuf,
    pub schema: Option<String>,
}

impl ResolvedBackend {
    pub(crate) fn new(backend_type: &str, plugin_dir: &Path, descriptor: BackendDescriptor) -> Self {
        Self {
            backend_type: backend_type.to_string(),
            absolute_path: plugin_dir.join(&descriptor.path).join(&descriptor.name),
            schema: descriptor.schema,
        }
    }

    pub fn kind(&self) -> BackendKind {
        BackendKind::from_identifier(&self.backend_type)
    }

    /// The data file path with `.` and `..` folded, for log output.
    pub fn display_path(&self) -> PathBuf {
        lexically_normal(&self.absolute_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorKind;
    use serde_json::json;

    #[test]
    fn test_kind_from_identifier() {
        assert_eq!(BackendKind::from_identifier("sqlite"), BackendKind::Sqlite);
        assert_eq!(BackendKind::from_identifier("mysql"), BackendKind::MySql);
        assert_eq!(BackendKind::from_identifier("postgres"), BackendKind::Postgres);
        assert_eq!(BackendKind::from_identifier("SQLite"), BackendKind::Other);
        assert!(BackendKind::Sqlite.is_file_based());
        assert!(!BackendKind::MySql.is_file_based());
    }

    #[test]
    fn test_file_based_entry_requires_schema() {
        let entry = json!({ "path": "data", "name": "surf.db" });
        let err = BackendDescriptor::from_entry("databases.json", "sqlite", &entry).unwrap_err();

        assert_eq!(err.kind(), ConfigErrorKind::MissingField);
        assert_eq!(err.field(), Some("schema"));
        assert_eq!(err.document(), "databases.json[\"sqlite\"]");
    }

    #[test]
    fn test_server_entry_schema_is_optional() {
        let entry = json!({ "path": "remote", "name": "surf" });
        let descriptor = BackendDescriptor::from_entry("databases.json", "mysql", &entry).unwrap();
        assert_eq!(descriptor.schema, None);

        let entry = json!({ "path": "remote", "name": "surf", "schema": 2 });
        let err = BackendDescriptor::from_entry("databases.json", "mysql", &entry).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::TypeMismatch);
    }

    #[test]
    fn test_non_object_entry() {
        let err = BackendDescriptor::from_entry("databases.json", "sqlite", &json!("surf.db"))
            .unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("sqlite"));
    }

    #[test]
    fn test_display_path_normalizes() {
        let descriptor = BackendDescriptor {
            path: "./data/../data".to_string(),
            name: "surf.db".to_string(),
            schema: Some("v1".to_string()),
        };
        let resolved = ResolvedBackend::new("sqlite", Path::new("/srv/game/addons/cs2-surf"), descriptor);

        assert_eq!(
            resolved.absolute_path,
            PathBuf::from("/srv/game/addons/cs2-surf/./data/../data/surf.db")
        );
        assert_eq!(
            resolved.display_path(),
            PathBuf::from("/srv/game/addons/cs2-surf/data/surf.db")
        );
        assert_eq!(resolved.kind(), BackendKind::Sqlite);
    }
}
