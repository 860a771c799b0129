//! Centralized constants for the dotenv loader.
//!
//! Default option values and the diagnostic messages reported to a
//! [`Logger`](crate::Logger) live here so callers can match on them.

// =============================================================================
// Option Defaults
// =============================================================================

/// File name joined onto candidate paths that resolve to a directory.
pub const DOTENV_FILENAME: &str = ".env";

/// Candidate path used when none are configured: the filesystem root itself.
pub const DEFAULT_PATH: &str = ".";

// =============================================================================
// Diagnostic Messages
// =============================================================================

/// Warning emitted when a candidate path does not exist.
pub const MSG_PATH_NOT_FOUND: &str = "path not found";

/// Info emitted when a candidate directory is joined with [`DOTENV_FILENAME`].
pub const MSG_DIRECTORY_JOINED: &str = "directory detected; joining dotenv";

/// Warning emitted when the file resolved for a candidate does not exist.
pub const MSG_DOTENV_NOT_FOUND: &str = "dotenv not found";
