//! Error types for benchmark analysis.
//!
//! Most input problems are absorbed by the loader (missing files become
//! skipped suites, malformed values become defaults). What remains here are
//! the failures that cannot be degraded: unreadable files, broken CSV
//! structure and invalid configuration.

use thiserror::Error;

/// Unified error type for the analysis engine.
#[derive(Error, Debug)]
pub enum BenchError {
    /// I/O errors (permission denied, directory instead of file, ...)
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Structural CSV errors (invalid UTF-8, unreadable header)
    #[error("CSV error")]
    Csv(#[from] csv::Error),

    /// Parsing errors outside the safe-coercion rules
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::Config(err.to_string())
    }
}

impl From<String> for BenchError {
    fn from(s: String) -> Self {
        BenchError::Other(s)
    }
}

impl From<&str> for BenchError {
    fn from(s: &str) -> Self {
        BenchError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BenchError::Config("bad threshold".into());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("bad threshold"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BenchError = io_err.into();
        assert!(matches!(err, BenchError::Io(_)));
    }

    #[test]
    fn test_wrapped_errors_leave_detail_to_source() {
        use std::error::Error as _;

        let err: BenchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("gone"));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc\n".as_bytes());
        let csv_err = reader
            .records()
            .find_map(Result::err)
            .expect("ragged row should fail");
        let err: BenchError = csv_err.into();
        assert_eq!(err.to_string(), "CSV error");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let parsed: Result<toml::Value, _> = toml::from_str("not = [valid");
        let err: BenchError = parsed.unwrap_err().into();
        assert!(matches!(err, BenchError::Config(_)));
    }
}
