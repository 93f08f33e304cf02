//! Error types for landmark sessions

use thiserror::Error;

/// How a failure is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: directory contents, point budget, config file
    Configuration,
    /// The filesystem failed while reading or writing session files
    Io,
    /// The host could not load a model or point set
    Host,
}

/// Errors reported by session operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Points per model must be a positive integer")]
    InvalidPointBudget,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load '{model}': {source}")]
    HostLoad {
        model: String,
        #[source]
        source: pointselector_core::Error,
    },

    #[error("Landmark log is out of sync: {0}")]
    LogOutOfSync(String),

    #[error(transparent)]
    Core(#[from] pointselector_core::Error),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidPointBudget | SessionError::InvalidConfig(_) => ErrorKind::Configuration,
            SessionError::HostLoad { .. } => ErrorKind::Host,
            SessionError::LogOutOfSync(_) => ErrorKind::Io,
            SessionError::Core(e) if e.is_configuration() => ErrorKind::Configuration,
            SessionError::Core(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind() {
        assert_eq!(SessionError::InvalidPointBudget.kind(), ErrorKind::Configuration);

        let empty = pointselector_core::Error::EmptyModelDirectory {
            path: PathBuf::from("cases"),
            extension: "ply".to_string(),
        };
        assert_eq!(SessionError::from(empty).kind(), ErrorKind::Configuration);

        let disk = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = SessionError::from(pointselector_core::Error::from(disk));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "I/O error: disk full");

        let load = SessionError::HostLoad {
            model: "a.ply".to_string(),
            source: pointselector_core::Error::InvalidData("bad header".to_string()),
        };
        assert_eq!(load.kind(), ErrorKind::Host);
        assert_eq!(load.to_string(), "Failed to load 'a.ply': Invalid data: bad header");
    }
}
