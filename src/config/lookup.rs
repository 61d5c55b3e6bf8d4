// Key-value lookup used in place of direct process environment access

use std::collections::HashMap;

/// Source of environment-style key/value pairs.
///
/// Handlers read every variable through this trait so tests can inject
/// values without touching the real process environment.
pub trait EnvLookup: Send + Sync {
    /// Returns the value for `key`, or `None` when it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// Like [`EnvLookup::get`], but treats an empty value as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// Reads the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values count as unset
        std::env::var(key).ok()
    }
}

/// Fixed in-memory set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
