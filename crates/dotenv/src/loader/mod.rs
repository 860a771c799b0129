//! `.env` loading pipeline.
//!
//! Responsibilities:
//! - Resolve candidate paths to `.env` files (directories join `.env`).
//! - Parse `KEY=VALUE` lines and write them into an environment store.
//! - Provide the `Loader` builder and the `load`/`load_with` entry points.
//!
//! Does NOT handle:
//! - Variable interpolation, multi-line values, or escape sequences.
//! - Watching files for changes.
//!
//! Invariants / Assumptions:
//! - Paths are processed in order; the last assignment of a key wins.
//! - Missing paths are warnings. Every other failure aborts the load, and
//!   nothing already written is rolled back.

mod builder;
mod error;
mod parser;
mod resolve;

#[cfg(test)]
mod tests;

pub use builder::{Loader, Options, load, load_with};
pub use error::{ConfigError, DotenvError, SetVarError};
pub use parser::parse_line;
