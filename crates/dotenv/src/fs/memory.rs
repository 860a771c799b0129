//! In-memory [`FileSystem`] for tests and embedded configuration.
//!
//! Responsibilities:
//! - Serve file contents from a map keyed by slash path.
//! - Treat every ancestor of a registered file as an implicit directory.
//! - Inject stat/open/read/close failures per path.
//! - Track how many handles are currently open.
//!
//! Invariants:
//! - Clones share the open-handle counter, so a clone handed to a loader can
//!   be inspected afterwards through the original.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead, Cursor, ErrorKind, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FileSystem, Metadata, OpenFile, check_path};
use crate::constants::DEFAULT_PATH;

#[derive(Debug, Clone, Default)]
struct Faults {
    metadata: BTreeMap<String, ErrorKind>,
    open: BTreeMap<String, ErrorKind>,
    read: BTreeMap<String, ErrorKind>,
    close: BTreeMap<String, ErrorKind>,
}

/// Map-backed filesystem.
///
/// ```
/// use dotenv_loader::{FileSystem, MemoryFs};
///
/// let fs = MemoryFs::new().with_file("app/.env", "GREETING=hello\n");
/// assert!(fs.metadata("app").unwrap().is_dir());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    faults: Faults,
    open_handles: Arc<AtomicUsize>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file with the given contents.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Register an empty directory.
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Make stat of `path` fail with `kind`.
    pub fn fail_metadata(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.faults.metadata.insert(path.into(), kind);
        self
    }

    /// Make opening `path` fail with `kind`.
    pub fn fail_open(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.faults.open.insert(path.into(), kind);
        self
    }

    /// Make reading `path` fail with `kind` once its contents are exhausted.
    pub fn fail_read(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.faults.read.insert(path.into(), kind);
        self
    }

    /// Make closing `path` fail with `kind`.
    pub fn fail_close(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.faults.close.insert(path.into(), kind);
        self
    }

    /// Number of handles opened and not yet closed or dropped.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    fn is_dir(&self, path: &str) -> bool {
        if path == DEFAULT_PATH || self.dirs.contains(path) {
            return true;
        }
        let prefix = format!("{}/", path);
        self.files
            .keys()
            .chain(self.dirs.iter())
            .any(|entry| entry.starts_with(&prefix))
    }
}

fn injected(kind: ErrorKind, op: &str, path: &str) -> io::Error {
    io::Error::new(kind, format!("{} {:?}: injected failure", op, path))
}

impl FileSystem for MemoryFs {
    fn metadata(&self, path: &str) -> io::Result<Metadata> {
        check_path("stat", path)?;
        if let Some(kind) = self.faults.metadata.get(path) {
            return Err(injected(*kind, "stat", path));
        }
        if self.files.contains_key(path) {
            Ok(Metadata::file())
        } else if self.is_dir(path) {
            Ok(Metadata::dir())
        } else {
            Err(io::Error::new(
                ErrorKind::NotFound,
                format!("stat {:?}: not found", path),
            ))
        }
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn OpenFile>> {
        check_path("open", path)?;
        if let Some(kind) = self.faults.open.get(path) {
            return Err(injected(*kind, "open", path));
        }

        let (data, read_fault) = match self.files.get(path) {
            Some(data) => (data.clone(), self.faults.read.get(path).copied()),
            // Opening a directory succeeds; reading from it does not.
            None if self.is_dir(path) => (Vec::new(), Some(ErrorKind::Other)),
            None => {
                return Err(io::Error::new(
                    ErrorKind::NotFound,
                    format!("open {:?}: not found", path),
                ));
            }
        };

        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryFile {
            path: path.to_string(),
            cursor: Cursor::new(data),
            read_fault,
            close_fault: self.faults.close.get(path).copied(),
            open_handles: Some(Arc::clone(&self.open_handles)),
        }))
    }
}

struct MemoryFile {
    path: String,
    cursor: Cursor<Vec<u8>>,
    read_fault: Option<ErrorKind>,
    close_fault: Option<ErrorKind>,
    open_handles: Option<Arc<AtomicUsize>>,
}

impl MemoryFile {
    fn release(&mut self) {
        if let Some(counter) = self.open_handles.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn exhausted(&self) -> bool {
        self.cursor.position() as usize >= self.cursor.get_ref().len()
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for MemoryFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.exhausted()
            && let Some(kind) = self.read_fault
        {
            return Err(injected(kind, "read", &self.path));
        }
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt);
    }
}

impl OpenFile for MemoryFile {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.release();
        match self.close_fault {
            Some(kind) => Err(injected(kind, "close", &self.path)),
            None => Ok(()),
        }
    }
}

impl Drop for MemoryFile {
    fn drop(&mut self) {
        self.release();
    }
}
