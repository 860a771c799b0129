//! Filesystem abstraction used to resolve and open `.env` files.
//!
//! Responsibilities:
//! - Define the [`FileSystem`] capability (stat a path, open it for reading).
//! - Define [`OpenFile`], a buffered reader with an explicit, fallible close.
//! - Provide the slash-path helpers shared by every implementation.
//!
//! Does NOT handle:
//! - Path resolution policy (see `loader::resolve`).
//! - Parsing file contents (see `loader::parser`).
//!
//! Invariants:
//! - Paths are slash-separated and relative to the filesystem root.
//! - Invalid paths fail with `ErrorKind::InvalidInput`, never `NotFound`.

mod memory;
mod root;

use std::io::{self, BufRead, ErrorKind};

use crate::constants::{DEFAULT_PATH, DOTENV_FILENAME};

pub use memory::MemoryFs;
pub use root::RootFs;

/// Metadata about an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    is_dir: bool,
}

impl Metadata {
    /// Metadata for a regular file.
    pub fn file() -> Self {
        Self { is_dir: false }
    }

    /// Metadata for a directory.
    pub fn dir() -> Self {
        Self { is_dir: true }
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// A file opened for reading.
///
/// Dropping the handle releases it too, but [`OpenFile::close`] is the only
/// way to observe a release failure.
pub trait OpenFile: BufRead {
    /// Release the handle.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// A read-only filesystem rooted somewhere.
pub trait FileSystem {
    /// Stat `path`. Missing entries must fail with `ErrorKind::NotFound`.
    fn metadata(&self, path: &str) -> io::Result<Metadata>;

    /// Open `path` for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn OpenFile>>;
}

impl<F: FileSystem + ?Sized> FileSystem for Box<F> {
    fn metadata(&self, path: &str) -> io::Result<Metadata> {
        (**self).metadata(path)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn OpenFile>> {
        (**self).open(path)
    }
}

/// Returns true if `path` is a valid root-relative slash path.
///
/// `"."` names the root. Any other path must be a non-empty sequence of
/// `/`-separated elements, none of which is empty, `.` or `..`.
pub fn is_valid_path(path: &str) -> bool {
    if path == DEFAULT_PATH {
        return true;
    }
    !path.is_empty()
        && path
            .split('/')
            .all(|elem| !elem.is_empty() && elem != "." && elem != "..")
}

/// Join a directory path with [`DOTENV_FILENAME`].
///
/// ```
/// assert_eq!(dotenv_loader::join_dotenv("."), ".env");
/// assert_eq!(dotenv_loader::join_dotenv("config/"), "config/.env");
/// ```
pub fn join_dotenv(dir: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == DEFAULT_PATH {
        DOTENV_FILENAME.to_string()
    } else {
        format!("{}/{}", dir, DOTENV_FILENAME)
    }
}

pub(crate) fn check_path(op: &str, path: &str) -> io::Result<()> {
    if is_valid_path(path) {
        Ok(())
    } else {
        Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} {:?}: invalid path", op, path),
        ))
    }
}
