//! Error types for configuration resolution.
//!
//! Every variant names the document (and, where it applies, the field) that
//! was at fault so an operator can fix the file without reading source.

use std::path::PathBuf;

/// Errors raised while locating, parsing or validating plugin configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration file does not exist or cannot be opened
    #[error("Configuration document {document} could not be opened at {}: {source}", .path.display())]
    DocumentNotFound {
        document: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not well-formed JSON
    #[error("Failed to parse {document}: {source}")]
    ParseError {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent
    #[error("Missing field '{field}' in {document}")]
    MissingField { document: String, field: String },

    /// A field is present but has the wrong JSON type
    #[error("Field '{field}' in {document} must be {expected}, found {found}")]
    TypeMismatch {
        document: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The selected backend has no entry in the backends catalog
    #[error("Unknown backend type '{backend_type}': {document} has no entry for it")]
    UnknownBackendType {
        document: String,
        backend_type: String,
    },
}

/// Discriminant-only view of [`ConfigError`], handy for comparing outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    DocumentNotFound,
    ParseError,
    MissingField,
    TypeMismatch,
    UnknownBackendType,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::DocumentNotFound { .. } => ConfigErrorKind::DocumentNotFound,
            ConfigError::ParseError { .. } => ConfigErrorKind::ParseError,
            ConfigError::MissingField { .. } => ConfigErrorKind::MissingField,
            ConfigError::TypeMismatch { .. } => ConfigErrorKind::TypeMismatch,
            ConfigError::UnknownBackendType { .. } => ConfigErrorKind::UnknownBackendType,
        }
    }

    /// Name of the document the error refers to.
    pub fn document(&self) -> &str {
        match self {
            ConfigError::DocumentNotFound { document, .. }
            | ConfigError::ParseError { document, .. }
            | ConfigError::MissingField { document, .. }
            | ConfigError::TypeMismatch { document, .. }
            | ConfigError::UnknownBackendType { document, .. } => document,
        }
    }

    /// The offending field, for `MissingField` and `TypeMismatch`.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field, .. } | ConfigError::TypeMismatch { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_document_and_field() {
        let err = ConfigError::MissingField {
            document: "databases.json[\"sqlite\"]".to_string(),
            field: "name".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'name'"));
        assert!(message.contains("databases.json"));
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.kind(), ConfigErrorKind::MissingField);
    }

    #[test]
    fn test_unknown_backend_message() {
        let err = ConfigError::UnknownBackendType {
            document: "databases.json".to_string(),
            backend_type: "mysql".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown backend type 'mysql': databases.json has no entry for it"
        );
        assert_eq!(err.field(), None);
        assert_eq!(err.document(), "databases.json");
    }

    #[test]
    fn test_document_not_found_keeps_source() {
        use std::error::Error;

        let err = ConfigError::DocumentNotFound {
            document: "settings.json".to_string(),
            path: PathBuf::from("/srv/game/addons/cs2-surf/configs/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/srv/game/addons/cs2-surf/configs/settings.json"));
    }
}
