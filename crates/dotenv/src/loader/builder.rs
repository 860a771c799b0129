//! Loader options, builder, and entry points.
//!
//! Responsibilities:
//! - Hold the recognized options (paths, filesystem, logger) with documented defaults.
//! - Validate options before any path is touched.
//! - Drive resolution and parsing over the paths, left to right.
//!
//! Does NOT handle:
//! - Per-path resolution rules (see `resolve.rs`).
//! - Line interpretation (see `parser.rs`).
//!
//! Invariants / Assumptions:
//! - Later paths override earlier ones; within a file, later lines override earlier ones.
//! - Writes are applied immediately. A fatal error leaves earlier writes in place.
//! - `Loader` fills in a `RootFs` over the current directory only when no
//!   filesystem was configured; `load_with` never fills in defaults.

use std::fmt;

use super::error::{ConfigError, DotenvError};
use super::parser;
use super::resolve::{process_file, resolve};
use crate::constants::DEFAULT_PATH;
use crate::env::{EnvStore, ProcessEnv};
use crate::fs::{FileSystem, RootFs};
use crate::logger::{Logger, NopLogger};

/// Recognized loader options.
pub struct Options {
    /// Candidate files or directories, in override order.
    pub paths: Vec<String>,
    /// Filesystem the paths are resolved against.
    pub fs: Option<Box<dyn FileSystem>>,
    /// Diagnostics sink.
    pub logger: Option<Box<dyn Logger>>,
}

impl Default for Options {
    /// `["."]`, no filesystem, and a [`NopLogger`].
    fn default() -> Self {
        Self {
            paths: vec![DEFAULT_PATH.to_string()],
            fs: None,
            logger: Some(Box::new(NopLogger)),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("paths", &self.paths)
            .field("fs", &self.fs.as_ref().map(|_| "..."))
            .field("logger", &self.logger.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Options {
    /// Check that every option required for loading is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capabilities().map(|_| ())
    }

    fn capabilities(&self) -> Result<(&dyn FileSystem, &dyn Logger), ConfigError> {
        if self.paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }
        let fs = self.fs.as_deref().ok_or(ConfigError::MissingFilesystem)?;
        let logger = self.logger.as_deref().ok_or(ConfigError::MissingLogger)?;
        Ok((fs, logger))
    }
}

/// Builder for loading `.env` files.
#[derive(Debug, Default)]
pub struct Loader {
    options: Options,
}

impl Loader {
    /// Create a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate paths, in override order.
    ///
    /// A directory path stands for `<dir>/.env`.
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the filesystem paths are resolved against.
    ///
    /// Defaults to a [`RootFs`] over the current working directory.
    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.options.fs = Some(Box::new(fs));
        self
    }

    /// Set the diagnostics sink. Defaults to [`NopLogger`].
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.options.logger = Some(Box::new(logger));
        self
    }

    /// Options configured so far. The filesystem stays unset until
    /// [`Loader::load_into`] fills in its default.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Hand the configured options over to [`load_with`].
    pub fn into_options(self) -> Options {
        self.options
    }

    /// Load into the process environment.
    ///
    /// Call this during single-threaded startup; see [`ProcessEnv`].
    ///
    /// # Errors
    ///
    /// Returns an error if options are invalid, if a path exists but cannot
    /// be stat'ed, opened, read or closed, or if a variable cannot be set.
    /// Missing paths are reported to the logger and skipped.
    pub fn load(self) -> Result<(), DotenvError> {
        self.load_into(&mut ProcessEnv::new())
    }

    /// Load into `store` instead of the process environment.
    pub fn load_into<E>(mut self, store: &mut E) -> Result<(), DotenvError>
    where
        E: EnvStore + ?Sized,
    {
        if self.options.fs.is_none() {
            let root = RootFs::current_dir()
                .map_err(|source| DotenvError::DefaultFilesystem { source })?;
            self.options.fs = Some(Box::new(root));
        }
        load_with(&self.options, store)
    }
}

/// Load the given paths from the current directory into the process environment.
///
/// Shorthand for `Loader::new().with_paths(paths).load()`.
pub fn load<I, S>(paths: I) -> Result<(), DotenvError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Loader::new().with_paths(paths).load()
}

/// Load with fully specified options, without filling in any defaults.
pub fn load_with<E>(options: &Options, store: &mut E) -> Result<(), DotenvError>
where
    E: EnvStore + ?Sized,
{
    let (fs, logger) = options.capabilities()?;

    for candidate in &options.paths {
        let Some(env_path) = resolve(fs, logger, candidate)? else {
            continue;
        };
        let assignments = process_file(fs, &env_path, |file| {
            parser::apply(file, &env_path, &mut *store)
        })?;
        tracing::debug!(path = %env_path, assignments, "Applied dotenv file");
    }
    Ok(())
}
