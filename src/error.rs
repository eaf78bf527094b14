//! All error types for the langtable crate.
//!
//! Routine translation loads never surface these: a file that cannot be read
//! or parsed is recorded as a failed load instead. Errors are returned from
//! explicit requests such as file validation, metadata reads and option files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("parse error in {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Creates a parse error pointing at a 1-based line of a file.
    pub fn parse_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid metadata error.
    pub fn invalid_metadata(message: impl Into<String>) -> Self {
        Error::InvalidMetadata(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_file_not_found_error() {
        let error = Error::FileNotFound(PathBuf::from("language/en-GB/en-GB.ini"));
        assert_eq!(
            error.to_string(),
            "file not found: language/en-GB/en-GB.ini"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = Error::parse_error("fr-FR.ini", 12, "unterminated quoted value");
        assert_eq!(
            error.to_string(),
            "parse error in fr-FR.ini:12: unterminated quoted value"
        );
    }

    #[test]
    fn test_invalid_metadata_error() {
        let error = Error::invalid_metadata("missing <metadata> element");
        assert_eq!(
            error.to_string(),
            "invalid metadata: missing <metadata> element"
        );
    }

    #[test]
    fn test_config_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("config error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::FileNotFound(PathBuf::from("x.ini"));
        let debug = format!("{:?}", error);
        assert!(debug.contains("FileNotFound"));
        assert!(debug.contains("x.ini"));
    }
}
