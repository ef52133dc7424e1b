// ── Configuration materializer ──
//
// Expands `${VAR}` placeholders in connector configurations. The
// environment is an explicit `EnvLookup` so callers can layer file-backed
// values over the process env, and tests can pass a plain map.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z0-9_]+)\}").expect("placeholder pattern is a valid regex")
});

/// Read-only key/value view of an environment.
pub trait EnvLookup: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher + Send + Sync> EnvLookup for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Overlay values consulted before falling through to `base`.
#[derive(Debug, Clone, Default)]
pub struct LayeredEnv<E> {
    overlay: HashMap<String, String>,
    base: E,
}

impl<E: EnvLookup> LayeredEnv<E> {
    pub fn new(base: E) -> Self {
        Self {
            overlay: HashMap::new(),
            base,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overlay.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Keys supplied by the overlay, unordered.
    pub fn overlay_keys(&self) -> impl Iterator<Item = &str> {
        self.overlay.keys().map(String::as_str)
    }
}

impl<E: EnvLookup> EnvLookup for LayeredEnv<E> {
    fn get(&self, key: &str) -> Option<String> {
        self.overlay
            .get(key)
            .cloned()
            .or_else(|| self.base.get(key))
    }
}

/// Replace every `${NAME}` in `input`. Unset variables become `""`.
pub fn expand_placeholders(input: &str, env: &dyn EnvLookup) -> String {
    PLACEHOLDER
        .replace_all(input, |caps: &Captures<'_>| {
            env.get(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Recursively expand placeholders in every string of a JSON tree.
///
/// Object keys and non-string scalars are left untouched.
pub fn materialize(value: &Value, env: &dyn EnvLookup) -> Value {
    match value {
        Value::String(s) => Value::String(expand_placeholders(s, env)),
        Value::Array(items) => Value::Array(items.iter().map(|v| materialize(v, env)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), materialize(v, env)))
                .collect(),
        ),
        other => other.clone(),
    }
}
