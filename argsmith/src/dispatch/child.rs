//! Handles to running children and the exits they report.

use std::io;
use std::process::ExitStatus;

/// Signals the relay forwards to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySignal {
    /// `SIGINT`, forwarded as soon as the parent receives it.
    Interrupt,
    /// `SIGTERM`, the follow-up when the child outlives the grace period.
    Terminate,
}

impl RelaySignal {
    /// Raw signal number.
    #[cfg(unix)]
    #[must_use]
    pub const fn as_raw(self) -> libc::c_int {
        match self {
            Self::Interrupt => libc::SIGINT,
            Self::Terminate => libc::SIGTERM,
        }
    }
}

/// How a child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    /// Exit code, when the child exited normally.
    pub code: Option<i32>,
    /// Terminating signal, when a signal ended the child.
    pub signal: Option<i32>,
}

impl ChildExit {
    /// A normal exit with `code`.
    #[must_use]
    pub const fn code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// Termination by `signal`.
    #[must_use]
    pub const fn signalled(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    /// Returns `true` for a zero exit code.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Status a shell would report: the exit code, or `128 + signal`.
    #[must_use]
    pub fn status_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => signal.saturating_add(128),
            (None, None) => 1,
        }
    }

    /// End the current process the way the child ended.
    ///
    /// On Unix a signalled child has its signal re-delivered to this process
    /// with the default disposition. Signals whose default action does not
    /// terminate fall through to [`status_code`](Self::status_code).
    pub fn propagate(self) -> ! {
        #[cfg(unix)]
        if let Some(signal) = self.signal {
            tracing::debug!(signal, "re-raising child signal");
            if let Err(err) = signal_hook::low_level::emulate_default_handler(signal) {
                tracing::warn!(signal, error = %err, "failed to re-raise child signal");
            }
        }
        std::process::exit(self.status_code())
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            Self {
                code: status.code(),
                signal: status.signal(),
            }
        }
        #[cfg(not(unix))]
        {
            Self {
                code: status.code(),
                signal: None,
            }
        }
    }
}

/// A running child process.
///
/// The relay thread and the waiting caller share one handle, so it must be
/// usable from several threads at once.
pub trait ChildHandle: Send + Sync {
    /// Operating-system process id.
    fn id(&self) -> u32;

    /// Deliver `signal` to the child.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the signal cannot be delivered.
    fn forward_signal(&self, signal: RelaySignal) -> io::Result<()>;

    /// Block until the child exits.
    ///
    /// # Errors
    ///
    /// Returns the OS error when waiting fails.
    fn wait_for_exit(&self) -> io::Result<ChildExit>;

    /// Wait for the child, hand its exit to `callback`, then return it.
    ///
    /// # Errors
    ///
    /// Returns the OS error when waiting fails; `callback` is not run.
    fn on_exit(&self, callback: &dyn Fn(ChildExit)) -> io::Result<ChildExit> {
        let exit = self.wait_for_exit()?;
        callback(exit);
        Ok(exit)
    }
}
