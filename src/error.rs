use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for pagefix
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("File access failed: {} ({source})", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

impl PatchError {
    /// Create a new file access error with path context
    pub fn file_access(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::FileAccess {
            path: path.into(),
            source: err,
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, err: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source: err,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Path involved in the failure, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileAccess { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias using PatchError
pub type PatchResult<T> = Result<T, PatchError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> PatchError {
    let path = path.into();
    move |err| PatchError::file_access(err, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_map_io_err_keeps_path() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.map_err(map_io_err("public/index.html")).unwrap_err();

        assert_eq!(err.path(), Some(Path::new("public/index.html")));
        assert!(err.to_string().contains("public/index.html"));
        assert!(err.to_string().contains("gone"));
    }
}
