//! Candidate path resolution and scoped file processing.
//!
//! Responsibilities:
//! - Turn one candidate path into the concrete `.env` file to read, or skip it.
//! - Open a resolved file, run a processing step, and always close it.
//!
//! Does NOT handle:
//! - Line interpretation (see `parser.rs`).
//! - Option defaults and validation (see `builder.rs`).
//!
//! Invariants:
//! - A missing candidate, or a missing `.env` inside a candidate directory,
//!   is a warning and never an error.
//! - Any other stat failure is fatal and names the path that failed.
//! - Close failures are reported, combined with a processing failure if both occur.

use std::io::ErrorKind;

use super::error::DotenvError;
use crate::constants::{MSG_DIRECTORY_JOINED, MSG_DOTENV_NOT_FOUND, MSG_PATH_NOT_FOUND};
use crate::fs::{FileSystem, Metadata, OpenFile, join_dotenv};
use crate::logger::Logger;

/// Resolve `candidate` to the file that should be parsed.
///
/// Returns `Ok(None)` when the candidate should be skipped.
pub(crate) fn resolve(
    fs: &dyn FileSystem,
    logger: &dyn Logger,
    candidate: &str,
) -> Result<Option<String>, DotenvError> {
    let Some(metadata) = stat(fs, candidate)? else {
        logger.warn(MSG_PATH_NOT_FOUND, &[("path", candidate)]);
        return Ok(None);
    };

    let env_path = if metadata.is_dir() {
        let joined = join_dotenv(candidate);
        logger.info(
            MSG_DIRECTORY_JOINED,
            &[("path", candidate), ("dotenv", joined.as_str())],
        );
        joined
    } else {
        candidate.to_string()
    };

    if stat(fs, &env_path)?.is_none() {
        logger.warn(MSG_DOTENV_NOT_FOUND, &[("path", env_path.as_str())]);
        return Ok(None);
    }
    Ok(Some(env_path))
}

fn stat(fs: &dyn FileSystem, path: &str) -> Result<Option<Metadata>, DotenvError> {
    match fs.metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(DotenvError::Stat {
            path: path.to_string(),
            source,
        }),
    }
}

/// Open `path`, hand it to `process`, then close it on every exit path.
pub(crate) fn process_file<T, F>(
    fs: &dyn FileSystem,
    path: &str,
    process: F,
) -> Result<T, DotenvError>
where
    F: FnOnce(&mut dyn OpenFile) -> Result<T, DotenvError>,
{
    let mut file = fs.open(path).map_err(|source| DotenvError::Open {
        path: path.to_string(),
        source,
    })?;

    let result = process(&mut *file);
    match (result, file.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(source)) => Err(DotenvError::Close {
            path: path.to_string(),
            source,
        }),
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close)) => Err(DotenvError::CloseAfterFailure {
            path: path.to_string(),
            error: Box::new(error),
            close,
        }),
    }
}
