// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transfer failed for {url}: {source}")]
    Transfer {
        url: String,
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Version manifest error: {0}")]
    Manifest(String),

    #[error("Remapper argument error: {0}")]
    RemapArguments(String),

    #[error("Failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code:?}")]
    ToolFailure {
        tool: &'static str,
        code: Option<i32>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Remapper argument construction is the one failure that must kill the
    /// whole process with a non-zero status. The runner only returns the
    /// error; the top-level caller performs the exit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RemapArguments(_))
    }

    /// Download-stage failures abort the run but are surfaced through the
    /// log alone, with a normal process exit.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            Self::Transfer { .. } | Self::UnexpectedStatus { .. } | Self::FileOperation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let err = PipelineError::RemapArguments("bad input path".to_string());
        assert!(err.is_fatal());
        assert!(!err.is_transfer());

        let err = PipelineError::Config("missing java_bin".to_string());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_transfer_classification() {
        let err = PipelineError::UnexpectedStatus {
            url: "https://example.com/client.jar".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(err.is_transfer());
        assert!(!err.is_fatal());

        let err = PipelineError::FileOperation {
            path: PathBuf::from("/tmp/out.jar"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.is_transfer());

        let err = PipelineError::ToolFailure {
            tool: "remapper",
            code: Some(1),
        };
        assert!(!err.is_transfer());
    }
}
