//! Error types for `.env` loading.
//!
//! Responsibilities:
//! - Define error variants for option validation, filesystem access,
//!   parsing, and environment writes.
//!
//! Invariants:
//! - Every filesystem variant names the offending path; store failures name the key.
//! - Errors NEVER include values read from `.env` files, to prevent secret leakage.

use std::io;
use thiserror::Error;

/// Option validation failures, reported before any path is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("should provide at least a single path")]
    NoPaths,

    #[error("should provide a root filesystem")]
    MissingFilesystem,

    #[error("logger should be provided")]
    MissingLogger,
}

/// Rejection of a single write by an [`EnvStore`](crate::EnvStore).
#[derive(Error, Debug)]
pub enum SetVarError {
    #[error("environment variable name is empty")]
    EmptyKey,

    #[error("environment variable name {key:?} contains '=' or NUL")]
    InvalidKey { key: String },

    #[error("value for environment variable {key:?} contains NUL")]
    InvalidValue { key: String },
}

/// Errors that abort a load.
///
/// Missing paths are not errors; they are reported to the logger and skipped.
#[derive(Error, Debug)]
pub enum DotenvError {
    #[error("Cannot load .env files with these options: {0}")]
    InvalidOptions(#[from] ConfigError),

    #[error("Failed to open the current directory as the default filesystem: {source}")]
    DefaultFilesystem {
        #[source]
        source: io::Error,
    },

    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to set environment variable {key}: {source}")]
    SetVar {
        key: String,
        #[source]
        source: SetVarError,
    },

    #[error("Failed to close file {path:?}: {source}")]
    Close {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Processing failed and releasing the file failed as well.
    #[error("{error}; also failed to close file {path:?}: {close}")]
    CloseAfterFailure {
        path: String,
        #[source]
        error: Box<DotenvError>,
        close: io::Error,
    },
}
