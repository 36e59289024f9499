//! Error types for the conversion pipeline.
//!
//! Two tiers: `RunError` aborts the whole run, `JobError` fails one file
//! and the pipeline moves on to the next.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error that aborts the run before or during the scan.
#[derive(Error, Debug)]
pub enum RunError {
    /// The chosen root does not exist.
    #[error("root directory not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    /// The chosen root exists but is not a directory.
    #[error("not a directory: {}", .path.display())]
    RootNotADirectory { path: PathBuf },

    /// A required external tool is not available at all.
    #[error("required tool '{tool}' not found in PATH")]
    ToolMissing { tool: String },
}

impl RunError {
    /// Create a root-not-found error.
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Create a not-a-directory error.
    pub fn root_not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::RootNotADirectory { path: path.into() }
    }

    /// Create a tool-missing error.
    pub fn tool_missing(tool: impl Into<String>) -> Self {
        Self::ToolMissing { tool: tool.into() }
    }
}

/// Error that fails a single file; the run continues.
#[derive(Error, Debug)]
pub enum JobError {
    /// The external process could not be launched.
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The external process exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The transcoder reported success but wrote nothing.
    #[error("no output produced at {}", .path.display())]
    MissingOutput { path: PathBuf },

    /// The transcoder reported success but the output is empty.
    #[error("empty output at {}", .path.display())]
    EmptyOutput { path: PathBuf },

    /// The archive folder already holds a file with this name.
    #[error("archive conflict: {} already exists", .path.display())]
    ArchiveConflict { path: PathBuf },

    /// File I/O error with operation context.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    /// Create a spawn error.
    pub fn spawn(tool: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            tool: tool.into(),
            source,
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for whole-run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Result type for per-file operations.
pub type JobResult<T> = Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_error_displays_context() {
        let err = JobError::command_failed("ffmpeg", 1, "invalid data found");
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("invalid data found"));
    }

    #[test]
    fn run_error_names_the_root() {
        let err = RunError::root_not_found("/no/such/dir");
        assert!(err.to_string().contains("/no/such/dir"));
    }
}
