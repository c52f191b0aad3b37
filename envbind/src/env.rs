//! Access to environment variables and files

use std::collections::HashMap;
use std::{env, fs, io};

use crate::expand::expand;

/// Source of raw values consulted while binding a record.
///
/// Only [`Environment::lookup`] is required. File reads default to
/// [`std::fs::read`] and expansion resolves references through `lookup`.
pub trait Environment {
    /// Returns the value of `key`, or `None` if it is not set.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Reads the whole file at `path`.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Expands `$VAR` and `${VAR}` references in `raw`.
    fn expand(&self, raw: &str) -> String {
        expand(raw, |name| self.lookup(name))
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnvironment;

impl Environment for OsEnvironment {
    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        env::var_os(key).map(|value| match value.into_string() {
            Ok(value) => value,
            Err(value) => value.to_string_lossy().into_owned(),
        })
    }
}

/// An in-memory snapshot of variables.
///
/// Files are still read from the file system.
///
/// ```rust
/// use envbind::{Environment, MapEnvironment};
///
/// let env: MapEnvironment = [("PORT", "8080")].into_iter().collect();
/// assert_eq!(env.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(env.lookup("HOST"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Remove `key`
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
