//! The resolved configuration returned by a parse, and the per-call
//! [`RuntimeConfig`] that steers it.
//!
//! A [`Config`] maps output keys to values. Long option names are camel-cased
//! (`dry-run` becomes `dryRun`) while short names appear verbatim, so an option
//! registered as `["d", "dry-run"]` and switched on yields both `d` and
//! `dryRun`. Options resolving to `false` or to nothing are left out.

mod runtime;

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::value::Value;

pub use runtime::{ColorChoice, RuntimeConfig, UsageFilter};

/// Output of a parse that did not dispatch a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config(BTreeMap<String, Value>);

impl Config {
    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Boolean stored under `key`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Text stored under `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer stored under `key`.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Number stored under `key`, widening integers.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// List stored under `key`.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    /// Returns `true` when `key` resolved to a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "BTreeMap length queries are not const-stable"
    )]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing resolved.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "BTreeMap length queries are not const-stable"
    )]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Deserialize the mapping into a caller-defined struct.
    ///
    /// Field names follow the output keys, so a struct usually wants
    /// `#[serde(rename_all = "camelCase")]` and `Option` or defaulted fields
    /// for anything that may be absent.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the mapping does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmith::Args;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "camelCase")]
    /// struct Opts {
    ///     dry_run: Option<bool>,
    /// }
    ///
    /// let mut args = Args::new();
    /// args.option(["d", "dry-run"], "Skip writes")?;
    /// let config = args
    ///     .try_parse(["node", "tool", "--dry-run"])?
    ///     .into_config()
    ///     .unwrap_or_default();
    /// let opts: Opts = config.extract()?;
    /// assert_eq!(opts.dry_run, Some(true));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn extract<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_owned(), value);
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests;
