//! Unit tests for environment guards.

use rstest::rstest;

use super::{lock, prepend_path, remove_var, set_var, with_lock};

fn read(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[rstest]
fn set_var_restores_absent_variable() {
    let key = "ARGSMITH_HELPERS_ABSENT";
    let _clear = remove_var(key);
    {
        let guard = set_var(key, "on");
        assert_eq!(guard.key(), key);
        assert_eq!(read(key).as_deref(), Some("on"));
    }
    assert_eq!(read(key), None);
}

#[rstest]
fn guards_restore_in_lifo_order() {
    let key = "ARGSMITH_HELPERS_STACK";
    let _base = set_var(key, "base");
    let outer = set_var(key, "outer");
    let inner = set_var(key, "inner");
    assert_eq!(read(key).as_deref(), Some("inner"));
    drop(inner);
    assert_eq!(read(key).as_deref(), Some("outer"));
    drop(outer);
    assert_eq!(read(key).as_deref(), Some("base"));
}

#[rstest]
fn remove_var_restores_previous_value() {
    let key = "ARGSMITH_HELPERS_REMOVE";
    let _base = set_var(key, "kept");
    {
        let _gone = remove_var(key);
        assert_eq!(read(key), None);
    }
    assert_eq!(read(key).as_deref(), Some("kept"));
}

#[rstest]
fn lock_is_reentrant() {
    let _lock = lock();
    let value = with_lock(|| {
        let _guard = set_var("ARGSMITH_HELPERS_REENTRANT", "x");
        read("ARGSMITH_HELPERS_REENTRANT")
    });
    assert_eq!(value.as_deref(), Some("x"));
}

#[rstest]
fn prepend_path_puts_directory_first() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let _lock = lock();
    let before = std::env::var_os("PATH");
    {
        let _path = prepend_path(dir.path())?;
        let path = std::env::var_os("PATH").unwrap_or_default();
        let first = std::env::split_paths(&path).next();
        anyhow::ensure!(first.as_deref() == Some(dir.path()), "unexpected PATH head: {first:?}");
    }
    anyhow::ensure!(std::env::var_os("PATH") == before, "PATH was not restored");
    Ok(())
}
