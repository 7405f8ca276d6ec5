//! Guarded mutation of environment variables in tests.
//!
//! Every mutation takes a process-wide re-entrant lock and returns an RAII
//! [`EnvVarGuard`] that puts the previous value back (or removes the variable)
//! when dropped. Guards for the same key restore in LIFO order. Tests that
//! read the environment across several steps can hold [`lock`] for the whole
//! sequence.
//!
//! # Examples
//!
//! ```
//! use argsmith_test_helpers::env;
//!
//! let _g = env::set_var("ARGSMITH_DEMO", "1");
//! assert_eq!(std::env::var("ARGSMITH_DEMO").as_deref(), Ok("1"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the write.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the write.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock until dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvLock")
    }
}

fn mutate(key: String, write: impl FnOnce(&str)) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    write(&key);
    EnvVarGuard { key, original }
}

/// Set `key` to `value` until the guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` for the write.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Remove `key` until the guard drops.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` for the write.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Put `dir` in front of `PATH` until the guard drops.
///
/// # Errors
///
/// Fails when the joined search path cannot be represented, for example
/// because `dir` contains the platform's path separator.
///
/// # Examples
///
/// ```
/// use argsmith_test_helpers::env;
///
/// let dir = std::env::temp_dir();
/// let _path = env::prepend_path(&dir)?;
/// let first = std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()).next();
/// assert_eq!(first.as_deref(), Some(dir.as_path()));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn prepend_path(dir: &Path) -> anyhow::Result<EnvVarGuard> {
    let _lock = lock();
    let current = env::var_os("PATH").unwrap_or_default();
    let entries = std::iter::once(dir.to_path_buf()).chain(env::split_paths(&current));
    let joined = env::join_paths(entries)?;
    Ok(set_var("PATH", joined))
}

/// Serialise environment access for the lifetime of the returned lock.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Run `f` while holding the environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}

#[cfg(test)]
mod tests;
