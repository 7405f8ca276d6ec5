//! Tests for command dispatch and child handling.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use rstest::rstest;

use super::relay::{Relays, relay_interrupt};
use super::{
    ChildExit, ChildHandle, Launcher, ProcessLauncher, RelaySignal, external_program,
    forwarded_args, run_external,
};
use crate::error::{ArgsError, ArgsResult};

#[derive(Default)]
struct FakeChild {
    exit: Option<ChildExit>,
    forwarded: Mutex<Vec<RelaySignal>>,
}

impl ChildHandle for FakeChild {
    fn id(&self) -> u32 {
        4242
    }

    fn forward_signal(&self, signal: RelaySignal) -> io::Result<()> {
        self.forwarded.lock().push(signal);
        Ok(())
    }

    fn wait_for_exit(&self) -> io::Result<ChildExit> {
        self.exit
            .ok_or_else(|| io::Error::other("child vanished"))
    }
}

#[derive(Default)]
struct FakeLauncher {
    exit: Option<ChildExit>,
    launched: Mutex<Vec<(String, Vec<String>)>>,
}

impl Launcher for FakeLauncher {
    fn launch(&self, program: &str, args: &[String]) -> ArgsResult<Box<dyn ChildHandle>> {
        self.launched
            .lock()
            .push((program.to_owned(), args.to_vec()));
        Ok(Box::new(FakeChild {
            exit: self.exit,
            ..FakeChild::default()
        }))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[rstest]
fn names_the_external_binary() {
    assert_eq!(external_program("tool", "binary"), "tool-binary");
}

#[rstest]
#[case(&["node", "tool", "binary", "x", "-y"], true, &["x", "-y"])]
#[case(&["node", "tool", "binary"], true, &[])]
#[case(&["node", "tool", "-y"], false, &["-y"])]
#[case(&["node"], true, &[])]
fn forwards_the_tail(#[case] argv: &[&str], #[case] has_token: bool, #[case] expected: &[&str]) {
    assert_eq!(forwarded_args(&strings(argv), has_token), strings(expected));
}

#[rstest]
fn returns_the_child_exit() -> anyhow::Result<()> {
    let launcher = FakeLauncher {
        exit: Some(ChildExit::code(3)),
        ..FakeLauncher::default()
    };
    let exit = run_external(&launcher, "tool-binary", &strings(&["a"]))?;
    anyhow::ensure!(exit == ChildExit::code(3), "unexpected exit {exit:?}");
    let launched = launcher.launched.lock().clone();
    anyhow::ensure!(
        launched == vec![("tool-binary".to_owned(), strings(&["a"]))],
        "unexpected launch {launched:?}"
    );
    Ok(())
}

#[rstest]
fn wait_failure_is_reported() {
    let launcher = FakeLauncher::default();
    let err = run_external(&launcher, "tool-binary", &[]).expect_err("wait must fail");
    assert!(matches!(err, ArgsError::Wait { ref binary, .. } if binary == "tool-binary"));
}

#[rstest]
fn on_exit_hands_over_the_exit() {
    let child = FakeChild {
        exit: Some(ChildExit::signalled(2)),
        ..FakeChild::default()
    };
    let seen = Mutex::new(None);
    let exit = child
        .on_exit(&|exit| *seen.lock() = Some(exit))
        .expect("fake child exits");
    assert_eq!(exit, ChildExit::signalled(2));
    assert_eq!(*seen.lock(), Some(exit));
}

#[rstest]
#[case(false, vec![RelaySignal::Interrupt, RelaySignal::Terminate])]
#[case(true, vec![RelaySignal::Interrupt])]
fn interrupt_escalates_unless_exited(#[case] exited: bool, #[case] expected: Vec<RelaySignal>) {
    let child = FakeChild::default();
    relay_interrupt(&child, &AtomicBool::new(exited), Duration::from_millis(1));
    assert_eq!(*child.forwarded.lock(), expected);
}

#[rstest]
fn default_action_returns_after_the_last_relay() {
    let default_action = AtomicBool::new(false);
    let mut relays = Relays::new();
    relays.enter(&default_action);
    relays.enter(&default_action);
    relays.leave(&default_action);
    assert!(!default_action.load(Ordering::SeqCst));
    relays.leave(&default_action);
    assert!(default_action.load(Ordering::SeqCst));
    relays.enter(&default_action);
    assert!(!default_action.load(Ordering::SeqCst));
}

#[rstest]
fn unbalanced_leave_keeps_the_default_action() {
    let default_action = AtomicBool::new(true);
    let mut relays = Relays::new();
    relays.leave(&default_action);
    assert!(default_action.load(Ordering::SeqCst));
}

#[rstest]
#[case(ChildExit::code(0), 0, true)]
#[case(ChildExit::code(7), 7, false)]
#[case(ChildExit::signalled(15), 143, false)]
fn status_codes(#[case] exit: ChildExit, #[case] status: i32, #[case] success: bool) {
    assert_eq!(exit.status_code(), status);
    assert_eq!(exit.success(), success);
}

#[rstest]
fn missing_binary_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = ProcessLauncher::new().with_search_path(dir.path());
    let err = run_external(&launcher, "tool-nowhere", &[]).expect_err("binary is absent");
    assert!(
        matches!(err, ArgsError::MissingExternalBinary { ref binary, .. } if binary == "tool-nowhere")
    );
}

#[cfg(unix)]
mod unix {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use rstest::rstest;

    use super::{ChildExit, Launcher, ProcessLauncher, RelaySignal, run_external, strings};

    fn script(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
    }

    #[rstest]
    fn propagates_exit_code_and_arguments() {
        let dir = tempfile::tempdir().expect("tempdir");
        script(dir.path(), "tool-count", "exit $#");
        let launcher = ProcessLauncher::new().with_search_path(dir.path());
        let exit = run_external(&launcher, "tool-count", &strings(&["a", "b", "c"]))
            .expect("script runs");
        assert_eq!(exit, ChildExit::code(3));
    }

    #[rstest]
    fn reports_terminating_signal() {
        let dir = tempfile::tempdir().expect("tempdir");
        script(dir.path(), "tool-die", "kill -TERM $$");
        let launcher = ProcessLauncher::new().with_search_path(dir.path());
        let exit = run_external(&launcher, "tool-die", &[]).expect("script runs");
        assert_eq!(exit, ChildExit::signalled(libc::SIGTERM));
        assert_eq!(exit.status_code(), 128 + libc::SIGTERM);
    }

    #[rstest]
    fn forwards_signals_to_the_child() {
        let dir = tempfile::tempdir().expect("tempdir");
        script(dir.path(), "tool-wait", "exec sleep 30");
        let launcher = ProcessLauncher::new().with_search_path(dir.path());
        let child = launcher.launch("tool-wait", &[]).expect("spawn");
        child
            .forward_signal(RelaySignal::Terminate)
            .expect("deliver SIGTERM");
        let exit = child.wait_for_exit().expect("wait");
        assert_eq!(exit.signal, Some(libc::SIGTERM));
    }
}
