//! Error handling module for SakhiMap
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Incomplete search criteria are never errors: they only keep the wizard
//! gate closed. Errors here cover terminal I/O and catalog data.

use thiserror::Error;

/// Main error type for SakhiMap
#[derive(Error, Debug)]
pub enum SakhiMapError {
    /// IO errors (terminal, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog validation errors (bad postal code, duplicate id, ...)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for SakhiMap operations
pub type Result<T> = std::result::Result<T, SakhiMapError>;

impl SakhiMapError {
    /// Create a catalog validation error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SakhiMapError::catalog("duplicate id mum-001");
        assert_eq!(err.to_string(), "Catalog error: duplicate id mum-001");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SakhiMapError = io_err.into();
        assert!(matches!(err, SakhiMapError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SakhiMapError = json_err.into();
        assert!(matches!(err, SakhiMapError::Json(_)));
    }
}
