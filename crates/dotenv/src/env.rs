//! Output mapping that parsed assignments are written into.
//!
//! Responsibilities:
//! - Define the [`EnvStore`] capability.
//! - Adapt the process environment ([`ProcessEnv`]) and plain maps to it.
//!
//! Invariants:
//! - `ProcessEnv` rejects keys and values that `std::env::set_var` would
//!   panic on, returning [`SetVarError`] instead.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::loader::SetVarError;

/// A mutable string-to-string mapping.
pub trait EnvStore {
    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError>;
}

/// The environment of the current process.
///
/// Writes go through `std::env::set_var`, which is only sound while no other
/// thread reads or writes the environment. Load `.env` files during
/// single-threaded startup, before spawning threads or an async runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvStore for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        if key.is_empty() {
            return Err(SetVarError::EmptyKey);
        }
        if key.contains(['=', '\0']) {
            return Err(SetVarError::InvalidKey {
                key: key.to_string(),
            });
        }
        if value.contains('\0') {
            return Err(SetVarError::InvalidValue {
                key: key.to_string(),
            });
        }
        // SAFETY: see the type-level docs; callers load during single-threaded startup.
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }
}

impl<S: BuildHasher> EnvStore for HashMap<String, String, S> {
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl EnvStore for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<E: EnvStore + ?Sized> EnvStore for &mut E {
    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        (**self).set(key, value)
    }
}
