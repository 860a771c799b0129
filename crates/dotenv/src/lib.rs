//! Load `KEY=VALUE` pairs from `.env` files into the process environment.
//!
//! This crate resolves an ordered list of candidate paths (files, or
//! directories standing in for `<dir>/.env`) against an abstract filesystem,
//! parses each resolved file line by line, and writes every assignment into
//! an environment store. Later paths override earlier ones.
//!
//! ```no_run
//! use dotenv_loader::{Loader, TracingLogger};
//!
//! Loader::new()
//!     .with_paths([".", "config/local.env"])
//!     .with_logger(TracingLogger)
//!     .load()
//!     .expect("failed to load .env files");
//! ```

pub mod constants;
mod env;
mod fs;
mod loader;
mod logger;

pub use env::{EnvStore, ProcessEnv};
pub use fs::{FileSystem, MemoryFs, Metadata, OpenFile, RootFs, is_valid_path, join_dotenv};
pub use loader::{
    ConfigError, DotenvError, Loader, Options, SetVarError, load, load_with, parse_line,
};
pub use logger::{Logger, NopLogger, TracingLogger};
