//! Tests for the `.env` loading pipeline.
//!
//! Responsibilities:
//! - Test path resolution and the diagnostics it emits.
//! - Test override order and line interpretation end to end.
//! - Test fatal error propagation, handle release, and partial application.
//! - Test loading into the real process environment.
//!
//! Invariants / Assumptions:
//! - Most tests load into a `BTreeMap` over a `MemoryFs`, so they touch no global state.
//! - Tests that mutate process-global state (cwd/env) use `serial_test` and `env_lock()`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::fs::MemoryFs;
use crate::loader::{DotenvError, Loader};
use crate::logger::Logger;

pub mod failure_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub msg: String,
    pub fields: Vec<(String, String)>,
}

pub fn record(level: Level, msg: &str, fields: &[(&str, &str)]) -> Record {
    Record {
        level,
        msg: msg.to_string(),
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Logger that keeps every diagnostic; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<Record>>>,
}

impl RecordingLogger {
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, msg: &str, fields: &[(&str, &str)]) {
        self.records
            .lock()
            .unwrap()
            .push(record(Level::Info, msg, fields));
    }

    fn warn(&self, msg: &str, fields: &[(&str, &str)]) {
        self.records
            .lock()
            .unwrap()
            .push(record(Level::Warn, msg, fields));
    }
}

/// Load `paths` from `fs` into a fresh map.
pub fn load_map(fs: MemoryFs, paths: &[&str]) -> Result<BTreeMap<String, String>, DotenvError> {
    let mut store = BTreeMap::new();
    Loader::new()
        .with_fs(fs)
        .with_paths(paths.iter().copied())
        .load_into(&mut store)?;
    Ok(store)
}

/// Build the expected map from literal pairs.
pub fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
