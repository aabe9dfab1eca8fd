//! Environment variable stores the loader reads from and writes to.

use std::collections::HashMap;

use super::EnvError;

/// Key-value store standing in for process-wide environment state.
///
/// [`ProcessEnv`] delegates to the real process environment; [`MemoryEnv`]
/// keeps everything in a map so callers can load without touching it.
pub trait EnvStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError>;

    /// Reports whether `set` would accept the pair, without writing it.
    fn check(&self, _key: &str, _value: &str) -> Result<(), EnvError> {
        Ok(())
    }

    fn remove(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        self.check(key, value)?;
        std::env::set_var(key, value);
        Ok(())
    }

    fn check(&self, key: &str, value: &str) -> Result<(), EnvError> {
        // std::env::set_var panics on these, report them instead
        let reason = if key.is_empty() {
            "empty name"
        } else if key.contains('=') {
            "name contains '='"
        } else if key.contains('\0') || value.contains('\0') {
            "contains a NUL byte"
        } else {
            return Ok(());
        };

        Err(EnvError::Apply {
            key: key.to_string(),
            reason: reason.to_string(),
        })
    }

    fn remove(&mut self, key: &str) {
        if !key.is_empty() && !key.contains(['=', '\0']) {
            std::env::remove_var(key);
        }
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every variable.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.vars.remove(key);
    }
}
