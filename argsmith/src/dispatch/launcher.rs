//! Spawning external command binaries.

use std::ffi::OsString;
use std::io;
use std::process::{Child, Command, Stdio};

use parking_lot::Mutex;

use super::child::{ChildExit, ChildHandle, RelaySignal};
use crate::error::{ArgsError, ArgsResult};

/// Starts external command binaries.
pub trait Launcher: Send + Sync {
    /// Start `program` with `args`, inheriting standard streams.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::MissingExternalBinary`] when `program` cannot be
    /// found and [`ArgsError::Spawn`] when it cannot be started.
    fn launch(&self, program: &str, args: &[String]) -> ArgsResult<Box<dyn ChildHandle>>;
}

/// Default [`Launcher`]: looks the binary up on the search path and spawns it.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    search_path: Option<OsString>,
}

impl ProcessLauncher {
    /// Launcher searching `PATH`.
    #[must_use]
    pub const fn new() -> Self {
        Self { search_path: None }
    }

    /// Search `paths`, formatted like `PATH`, instead of the environment.
    #[must_use]
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str, args: &[String]) -> ArgsResult<Box<dyn ChildHandle>> {
        let located = match &self.search_path {
            Some(paths) => which::which_in(program, Some(paths), std::env::current_dir()?),
            None => which::which(program),
        };
        let resolved = located.map_err(|source| ArgsError::MissingExternalBinary {
            binary: program.to_owned(),
            source,
        })?;
        tracing::debug!(binary = program, path = %resolved.display(), ?args, "spawning command binary");
        let child = Command::new(&resolved)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ArgsError::Spawn {
                binary: program.to_owned(),
                source,
            })?;
        Ok(Box::new(ProcessChild::new(child)))
    }
}

/// [`ChildHandle`] over a [`std::process::Child`].
#[derive(Debug)]
pub struct ProcessChild {
    pid: u32,
    child: Mutex<Child>,
}

impl ProcessChild {
    /// Wrap a spawned child.
    #[must_use]
    pub fn new(child: Child) -> Self {
        Self {
            pid: child.id(),
            child: Mutex::new(child),
        }
    }
}

impl ChildHandle for ProcessChild {
    fn id(&self) -> u32 {
        self.pid
    }

    #[cfg(unix)]
    fn forward_signal(&self, signal: RelaySignal) -> io::Result<()> {
        let pid = libc::pid_t::try_from(self.pid).map_err(io::Error::other)?;
        // SAFETY: `kill` has no memory-safety preconditions; `pid` names our
        // own child, which is not reaped before `wait_for_exit` returns.
        let rc = unsafe { libc::kill(pid, signal.as_raw()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[cfg(not(unix))]
    fn forward_signal(&self, signal: RelaySignal) -> io::Result<()> {
        match signal {
            RelaySignal::Terminate => self.child.lock().kill(),
            RelaySignal::Interrupt => Ok(()),
        }
    }

    fn wait_for_exit(&self) -> io::Result<ChildExit> {
        self.child.lock().wait().map(ChildExit::from)
    }
}
