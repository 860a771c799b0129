//! Diagnostics sink for the loader.
//!
//! Responsibilities:
//! - Define the [`Logger`] capability (info and warn, message plus context pairs).
//! - Provide the silent default ([`NopLogger`]) and a `tracing` adapter ([`TracingLogger`]).
//!
//! Does NOT handle:
//! - Subscriber or output configuration; that belongs to the application.
//!
//! Invariants:
//! - Context pairs carry paths only. Values read from `.env` files never
//!   reach a logger.

use std::fmt;
use std::sync::Arc;

/// Receives informational and warning diagnostics emitted while loading.
pub trait Logger {
    fn info(&self, msg: &str, fields: &[(&str, &str)]);
    fn warn(&self, msg: &str, fields: &[(&str, &str)]);
}

/// Logger that discards everything. Used when no logger is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn info(&self, _msg: &str, _fields: &[(&str, &str)]) {}
    fn warn(&self, _msg: &str, _fields: &[(&str, &str)]) {}
}

/// Logger that forwards diagnostics as `tracing` events.
///
/// Context pairs are rendered into a single `fields` value, e.g.
/// `fields=path=config dotenv=config/.env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, msg: &str, fields: &[(&str, &str)]) {
        tracing::info!(fields = %Fields(fields), "{}", msg);
    }

    fn warn(&self, msg: &str, fields: &[(&str, &str)]) {
        tracing::warn!(fields = %Fields(fields), "{}", msg);
    }
}

struct Fields<'a>(&'a [(&'a str, &'a str)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn info(&self, msg: &str, fields: &[(&str, &str)]) {
        (**self).info(msg, fields)
    }

    fn warn(&self, msg: &str, fields: &[(&str, &str)]) {
        (**self).warn(msg, fields)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info(&self, msg: &str, fields: &[(&str, &str)]) {
        (**self).info(msg, fields)
    }

    fn warn(&self, msg: &str, fields: &[(&str, &str)]) {
        (**self).warn(msg, fields)
    }
}
