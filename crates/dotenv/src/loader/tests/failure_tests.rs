//! Fatal error tests for the loader.
//!
//! Responsibilities:
//! - Test option validation errors.
//! - Test open, read, close and store failures, including combined close errors.
//! - Test that file handles are released on every exit path.
//! - Test that writes made before a failure are kept.

use std::collections::BTreeMap;
use std::error::Error;
use std::io::ErrorKind;

use super::{load_map, map};
use crate::env::EnvStore;
use crate::fs::MemoryFs;
use crate::loader::{ConfigError, DotenvError, Loader, Options, SetVarError, load_with};
use crate::logger::NopLogger;

/// Store that rejects one key and records everything else.
struct RejectingStore {
    reject: &'static str,
    inner: BTreeMap<String, String>,
}

impl EnvStore for RejectingStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        if key == self.reject {
            return Err(SetVarError::InvalidKey {
                key: key.to_string(),
            });
        }
        self.inner.set(key, value)
    }
}

#[test]
fn test_empty_paths_is_config_error() {
    let fs = MemoryFs::new().with_file(".env", "A=1\n");
    let mut store: BTreeMap<String, String> = BTreeMap::new();

    let err = Loader::new()
        .with_fs(fs)
        .with_paths(Vec::<String>::new())
        .load_into(&mut store)
        .unwrap_err();

    assert!(matches!(
        err,
        DotenvError::InvalidOptions(ConfigError::NoPaths)
    ));
    assert!(err.to_string().contains("at least a single path"));
}

#[test]
fn test_load_with_requires_filesystem() {
    let options = Options::default();
    let mut store: BTreeMap<String, String> = BTreeMap::new();

    let err = load_with(&options, &mut store).unwrap_err();

    assert!(matches!(
        err,
        DotenvError::InvalidOptions(ConfigError::MissingFilesystem)
    ));
}

#[test]
fn test_load_with_requires_logger() {
    let options = Options {
        paths: vec![".".to_string()],
        fs: Some(Box::new(MemoryFs::new())),
        logger: None,
    };

    assert!(matches!(
        options.validate(),
        Err(ConfigError::MissingLogger)
    ));
}

#[test]
fn test_load_with_explicit_options() {
    let options = Options {
        paths: vec!["app".to_string()],
        fs: Some(Box::new(MemoryFs::new().with_file("app/.env", "A=1\n"))),
        logger: Some(Box::new(NopLogger)),
    };
    let mut store: BTreeMap<String, String> = BTreeMap::new();

    assert!(options.validate().is_ok());
    load_with(&options, &mut store).unwrap();

    assert_eq!(store, map(&[("A", "1")]));
}

#[test]
fn test_builder_options_feed_load_with() {
    let loader = Loader::new()
        .with_paths(["app"])
        .with_fs(MemoryFs::new().with_file("app/.env", "A=1\n"));
    assert_eq!(loader.options().paths, vec!["app".to_string()]);
    assert!(loader.options().logger.is_some());

    let options = loader.into_options();
    let mut store: BTreeMap<String, String> = BTreeMap::new();
    load_with(&options, &mut store).unwrap();

    assert_eq!(store, map(&[("A", "1")]));
}

#[test]
fn test_builder_leaves_filesystem_unset() {
    let options = Loader::new().into_options();

    assert_eq!(options.paths, vec![".".to_string()]);
    assert!(options.fs.is_none());
    assert!(matches!(
        options.validate(),
        Err(ConfigError::MissingFilesystem)
    ));
}

#[test]
fn test_open_failure_is_fatal() {
    let fs = MemoryFs::new()
        .with_file(".env", "A=1\n")
        .fail_open(".env", ErrorKind::PermissionDenied);

    let err = load_map(fs, &["."]).unwrap_err();

    match err {
        DotenvError::Open { path, source } => {
            assert_eq!(path, ".env");
            assert_eq!(source.kind(), ErrorKind::PermissionDenied);
        }
        other => panic!("expected Open error, got {other}"),
    }
}

#[test]
fn test_read_failure_keeps_earlier_writes() {
    let fs = MemoryFs::new()
        .with_file("a/.env", "FIRST=1\n")
        .with_file("b/.env", "SECOND=2\nTHIRD=3\n")
        .with_file("c/.env", "NEVER=x\n")
        .fail_read("b/.env", ErrorKind::BrokenPipe);
    let observer = fs.clone();
    let mut store: BTreeMap<String, String> = BTreeMap::new();

    let err = Loader::new()
        .with_fs(fs)
        .with_paths(["a", "b", "c"])
        .load_into(&mut store)
        .unwrap_err();

    match &err {
        DotenvError::Read { path, source } => {
            assert_eq!(path, "b/.env");
            assert_eq!(source.kind(), ErrorKind::BrokenPipe);
        }
        other => panic!("expected Read error, got {other}"),
    }
    assert_eq!(
        store,
        map(&[("FIRST", "1"), ("SECOND", "2"), ("THIRD", "3")])
    );
    assert_eq!(observer.open_handles(), 0);
}

#[test]
fn test_store_rejection_aborts_file() {
    let fs = MemoryFs::new().with_file(".env", "OK=1\nBAD=2\nAFTER=3\n");
    let observer = fs.clone();
    let mut store = RejectingStore {
        reject: "BAD",
        inner: BTreeMap::new(),
    };

    let err = Loader::new()
        .with_fs(fs)
        .with_paths(["."])
        .load_into(&mut store)
        .unwrap_err();

    match &err {
        DotenvError::SetVar { key, source } => {
            assert_eq!(key, "BAD");
            assert!(matches!(source, SetVarError::InvalidKey { .. }));
        }
        other => panic!("expected SetVar error, got {other}"),
    }
    assert!(err.to_string().contains("BAD"));
    assert!(!err.to_string().contains('2'), "value leaked: {err}");
    assert_eq!(store.inner, map(&[("OK", "1")]));
    assert_eq!(observer.open_handles(), 0);
}

#[test]
fn test_close_failure_alone_is_reported() {
    let fs = MemoryFs::new()
        .with_file(".env", "A=1\n")
        .fail_close(".env", ErrorKind::Other);
    let mut store: BTreeMap<String, String> = BTreeMap::new();

    let err = Loader::new()
        .with_fs(fs)
        .with_paths(["."])
        .load_into(&mut store)
        .unwrap_err();

    match err {
        DotenvError::Close { path, .. } => assert_eq!(path, ".env"),
        other => panic!("expected Close error, got {other}"),
    }
    // The file was fully processed before closing failed.
    assert_eq!(store, map(&[("A", "1")]));
}

#[test]
fn test_close_failure_combined_with_read_failure() {
    let fs = MemoryFs::new()
        .with_file(".env", "A=1\n")
        .fail_read(".env", ErrorKind::BrokenPipe)
        .fail_close(".env", ErrorKind::Other);
    let observer = fs.clone();

    let err = load_map(fs, &["."]).unwrap_err();

    let message = err.to_string();
    match &err {
        DotenvError::CloseAfterFailure { path, error, close } => {
            assert_eq!(path, ".env");
            assert!(matches!(**error, DotenvError::Read { .. }));
            assert_eq!(close.kind(), ErrorKind::Other);
        }
        other => panic!("expected CloseAfterFailure error, got {other}"),
    }
    assert!(message.contains("read"), "message: {message}");
    assert!(message.contains("close"), "message: {message}");
    assert!(err.source().is_some());
    assert_eq!(observer.open_handles(), 0);
}

#[test]
fn test_reading_a_directory_named_like_a_file_is_fatal() {
    // "dir/.env" is itself a directory, so it is opened but cannot be read.
    let fs = MemoryFs::new().with_file("dir/.env/nested", "A=1\n");

    let err = load_map(fs, &["dir"]).unwrap_err();

    match err {
        DotenvError::Read { path, .. } => assert_eq!(path, "dir/.env"),
        other => panic!("expected Read error, got {other}"),
    }
}

#[test]
fn test_invalid_utf8_is_read_error() {
    let fs = MemoryFs::new().with_file(".env", b"A=1\nB=\xc3\x28\n".to_vec());

    match load_map(fs, &["."]).unwrap_err() {
        DotenvError::Read { path, source } => {
            assert_eq!(path, ".env");
            assert_eq!(source.kind(), ErrorKind::InvalidData);
        }
        other => panic!("expected Read error, got {other}"),
    }
}
