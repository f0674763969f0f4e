//! Error types shared across the crate.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Top-level error type for markgraph.
#[derive(Debug, Error)]
pub enum Error {
    /// An inline node reference appeared before any node was defined in its heading scope.
    #[error("line {line}: node reference `{label}` has no preceding node in scope")]
    MissingAncestorContext {
        /// 1-based line of the reference.
        line: usize,
        /// Label that was referenced.
        label: String,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialising the graph summary failed.
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single export's renderer call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer program could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        /// Program that was run.
        program: String,
        /// Underlying launch error.
        source: io::Error,
    },

    /// The payload could not be piped to the renderer.
    #[error("failed to write to `{program}`: {source}")]
    Write {
        /// Program that was run.
        program: String,
        /// Underlying pipe error.
        source: io::Error,
    },

    /// Waiting for the renderer to finish failed.
    #[error("failed to wait for `{program}`: {source}")]
    Wait {
        /// Program that was run.
        program: String,
        /// Underlying wait error.
        source: io::Error,
    },

    /// The renderer ran but reported failure.
    #[error("`{program}` exited with {status}")]
    Exit {
        /// Program that was run.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },
}
