//! Error types for Tableau

use thiserror::Error;

/// The main error type for Tableau operations
#[derive(Debug, Error)]
pub enum TableauError {
    #[error("Missing required identifier: {0}")]
    MissingIdentifier(String),

    #[error("Scene node already registered: {0}")]
    DuplicateScene(String),

    #[error("Unknown transition kind: {0}")]
    UnknownTransition(String),

    #[error("Unknown easing function: {0}")]
    UnknownEasing(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Tableau operations
pub type Result<T> = std::result::Result<T, TableauError>;

impl From<toml::de::Error> for TableauError {
    fn from(err: toml::de::Error) -> Self {
        TableauError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("a = [");
        let converted: TableauError = err.unwrap_err().into();
        assert!(matches!(converted, TableauError::TomlParseError(_)));
    }

    #[test]
    fn range_error_message() {
        let err = TableauError::ValueOutOfRange {
            field: "time_ms".into(),
            min: 0.0,
            max: 60000.0,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: time_ms must be between 0 and 60000, got -1"
        );
    }
}
