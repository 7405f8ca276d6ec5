//! Fake command binaries for dispatch tests.
//!
//! A command registered without a handler runs `<binary>-<command>` from the
//! search path. These helpers write small `/bin/sh` scripts under that name so
//! tests can observe the forwarded arguments and control the exit.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir`.
///
/// `body` is placed after the shebang line. On non-Unix targets the file is
/// written but cannot be made executable.
///
/// # Errors
///
/// Fails when the file cannot be written or its permissions changed.
pub fn write_script(dir: &Utf8Path, name: &str, body: &str) -> anyhow::Result<Utf8PathBuf> {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(path)
}

/// Write a script that prints each argument on its own line, then exits with
/// `code`.
///
/// # Errors
///
/// As for [`write_script`].
pub fn echo_args_script(dir: &Utf8Path, name: &str, code: i32) -> anyhow::Result<Utf8PathBuf> {
    write_script(
        dir,
        name,
        &format!("for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done\nexit {code}"),
    )
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::Command;

    use camino::Utf8Path;
    use rstest::rstest;

    use super::echo_args_script;

    #[rstest]
    fn echo_script_prints_arguments_and_exits() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = Utf8Path::from_path(dir.path()).ok_or_else(|| anyhow::anyhow!("non-UTF-8 tempdir"))?;
        let script = echo_args_script(root, "tool-echo", 4)?;
        let output = Command::new(script.as_std_path()).args(["a b", "-c"]).output()?;
        anyhow::ensure!(output.status.code() == Some(4), "status {:?}", output.status);
        anyhow::ensure!(
            String::from_utf8(output.stdout)? == "a b\n-c\n",
            "unexpected stdout"
        );
        Ok(())
    }
}
