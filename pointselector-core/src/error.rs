//! Error types for pointselector

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pointselector operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("No '.{extension}' model files found in {}", path.display())]
    EmptyModelDirectory { path: PathBuf, extension: String },

    #[error("Missing point set for model '{model}': expected {}", expected.display())]
    MissingCompanion { model: String, expected: PathBuf },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for pointselector operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error comes from bad user input (directory contents,
    /// file formats) rather than from the filesystem itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingDirectory { .. }
                | Error::EmptyModelDirectory { .. }
                | Error::MissingCompanion { .. }
                | Error::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        let empty = Error::EmptyModelDirectory {
            path: PathBuf::from("/data/case1"),
            extension: "ply".to_string(),
        };
        assert!(empty.is_configuration());
        assert_eq!(empty.to_string(), "No '.ply' model files found in /data/case1");

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert!(!io.is_configuration());
    }
}
