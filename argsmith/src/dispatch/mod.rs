//! Running a matched command.
//!
//! Commands registered with a handler run in process. Commands without one
//! are delegated to a separate binary named `<binary>-<command>`, found on the
//! search path and started with inherited standard streams. While it runs,
//! interrupts received by the parent are relayed to it; the child's exit is
//! returned as a [`ChildExit`] for the caller to propagate.

mod child;
mod launcher;
mod relay;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ArgsError, ArgsResult};

pub use child::{ChildExit, ChildHandle, RelaySignal};
pub use launcher::{Launcher, ProcessChild, ProcessLauncher};
pub use relay::GRACE;

/// Name of the binary implementing `command` for `binary`.
///
/// ```
/// assert_eq!(argsmith::external_program("tool", "install"), "tool-install");
/// ```
#[must_use]
pub fn external_program(binary: &str, command: &str) -> String {
    format!("{binary}-{command}")
}

/// Arguments passed on to a command binary.
///
/// `argv` is the full vector handed to a parse: launcher, program, then user
/// arguments. The launcher, the program and the command token are dropped.
/// A default command has no token, so only the first two are dropped.
#[must_use]
pub fn forwarded_args(argv: &[String], has_token: bool) -> Vec<String> {
    let skip = if has_token { 3 } else { 2 };
    argv.iter().skip(skip).cloned().collect()
}

/// Launch `program` and wait for it, relaying interrupts meanwhile.
///
/// Once the child has exited, `SIGINT` takes its default action in the
/// parent again.
///
/// # Errors
///
/// Propagates launch failures from `launcher` and returns [`ArgsError::Wait`]
/// when the child's status cannot be collected.
pub fn run_external(
    launcher: &dyn Launcher,
    program: &str,
    args: &[String],
) -> ArgsResult<ChildExit> {
    let child: Arc<dyn ChildHandle> = Arc::from(launcher.launch(program, args)?);
    let exited = Arc::new(AtomicBool::new(false));
    let relay = relay::start(&child, &exited);

    let waited = child.on_exit(&|exit| {
        exited.store(true, Ordering::SeqCst);
        tracing::debug!(binary = program, code = ?exit.code, signal = ?exit.signal, "command binary exited");
    });
    if let Some(active) = relay {
        active.stop();
    }
    waited.map_err(|source| ArgsError::Wait {
        binary: program.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests;
