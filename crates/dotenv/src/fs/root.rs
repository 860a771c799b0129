//! [`FileSystem`] backed by a directory on the real filesystem.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use super::{FileSystem, Metadata, OpenFile, check_path};
use crate::constants::DEFAULT_PATH;

/// Real filesystem confined to a root directory.
///
/// Only valid slash paths are accepted (see [`is_valid_path`](super::is_valid_path)),
/// so absolute paths and `..` components are rejected outright. Symlinks are
/// followed only while their target stays under the root; anything resolving
/// outside it fails with `ErrorKind::InvalidInput`.
#[derive(Debug, Clone)]
pub struct RootFs {
    root: PathBuf,
}

impl RootFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root the filesystem at the current working directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The directory every path is resolved against, as given to [`RootFs::new`].
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map `path` to a canonical location under the root.
    ///
    /// Missing entries surface as `NotFound` from canonicalization.
    fn resolve(&self, op: &str, path: &str) -> io::Result<PathBuf> {
        check_path(op, path)?;
        let joined = path
            .split('/')
            .filter(|elem| *elem != DEFAULT_PATH)
            .fold(self.root.clone(), |acc, elem| acc.join(elem));

        let root = self.root.canonicalize()?;
        let resolved = joined.canonicalize()?;
        if !resolved.starts_with(&root) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} {:?}: path escapes from root", op, path),
            ));
        }
        Ok(resolved)
    }
}

impl FileSystem for RootFs {
    fn metadata(&self, path: &str) -> io::Result<Metadata> {
        let meta = std::fs::metadata(self.resolve("stat", path)?)?;
        Ok(if meta.is_dir() {
            Metadata::dir()
        } else {
            Metadata::file()
        })
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn OpenFile>> {
        let file = File::open(self.resolve("open", path)?)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

impl OpenFile for BufReader<File> {
    fn close(self: Box<Self>) -> io::Result<()> {
        // std closes on drop and swallows the result; nothing else to report.
        drop(self);
        Ok(())
    }
}
