//! Forwards interrupts from the parent to a running child.
//!
//! While a dispatched binary runs the parent listens for `SIGINT`. Each one is
//! passed on to the child; if the child is still alive after [`GRACE`], a
//! `SIGTERM` follows.
//!
//! `signal-hook` keeps its handler installed once a signal has been
//! registered, and never chains to the default action. A conditional default
//! is therefore registered alongside the first relay and armed whenever no
//! relay is running, so an idle parent still dies on `SIGINT`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::child::{ChildHandle, RelaySignal};

/// Time a child gets to exit after an interrupt before it is terminated.
pub const GRACE: Duration = Duration::from_millis(500);

fn forward(child: &dyn ChildHandle, signal: RelaySignal) {
    if let Err(err) = child.forward_signal(signal) {
        tracing::warn!(pid = child.id(), ?signal, error = %err, "failed to forward signal");
    }
}

/// Bookkeeping for relays running in this process.
#[cfg_attr(
    not(any(unix, test)),
    expect(dead_code, reason = "only unix installs signal handlers")
)]
#[derive(Debug, Default)]
pub(crate) struct Relays {
    active: usize,
    fallback_installed: bool,
}

#[cfg_attr(
    not(any(unix, test)),
    expect(dead_code, reason = "only unix installs signal handlers")
)]
impl Relays {
    pub(crate) const fn new() -> Self {
        Self {
            active: 0,
            fallback_installed: false,
        }
    }

    /// Count a relay in and disarm the default action.
    pub(crate) fn enter(&mut self, default_action: &AtomicBool) {
        self.active += 1;
        default_action.store(false, Ordering::SeqCst);
    }

    /// Count a relay out, re-arming the default action after the last one.
    pub(crate) fn leave(&mut self, default_action: &AtomicBool) {
        self.active = self.active.saturating_sub(1);
        if self.active == 0 {
            default_action.store(true, Ordering::SeqCst);
        }
    }
}

/// React to one parent interrupt.
pub(crate) fn relay_interrupt(child: &dyn ChildHandle, exited: &AtomicBool, grace: Duration) {
    forward(child, RelaySignal::Interrupt);
    std::thread::sleep(grace);
    if !exited.load(Ordering::SeqCst) {
        forward(child, RelaySignal::Terminate);
    }
}

#[cfg(unix)]
mod imp {
    use std::io;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, LazyLock};
    use std::thread::JoinHandle;

    use parking_lot::Mutex;
    use signal_hook::consts::SIGINT;
    use signal_hook::iterator::{Handle, Signals};

    use super::{ChildHandle, GRACE, Relays, relay_interrupt};

    static RELAYS: Mutex<Relays> = parking_lot::const_mutex(Relays::new());
    static DEFAULT_ACTION: LazyLock<Arc<AtomicBool>> =
        LazyLock::new(|| Arc::new(AtomicBool::new(false)));

    fn enter() -> io::Result<()> {
        let mut relays = RELAYS.lock();
        if !relays.fallback_installed {
            signal_hook::flag::register_conditional_default(SIGINT, Arc::clone(&DEFAULT_ACTION))?;
            relays.fallback_installed = true;
        }
        relays.enter(&DEFAULT_ACTION);
        Ok(())
    }

    fn leave() {
        RELAYS.lock().leave(&DEFAULT_ACTION);
    }

    /// Running relay thread.
    pub(crate) struct SignalRelay {
        handle: Handle,
        thread: JoinHandle<()>,
    }

    impl SignalRelay {
        pub(crate) fn start(
            child: Arc<dyn ChildHandle>,
            exited: Arc<AtomicBool>,
        ) -> io::Result<Self> {
            enter()?;
            let mut signals = match Signals::new([SIGINT]) {
                Ok(signals) => signals,
                Err(err) => {
                    leave();
                    return Err(err);
                }
            };
            let handle = signals.handle();
            let thread = std::thread::spawn(move || {
                for signal in signals.forever() {
                    if signal == SIGINT {
                        relay_interrupt(child.as_ref(), &exited, GRACE);
                    }
                }
            });
            Ok(Self { handle, thread })
        }

        pub(crate) fn stop(self) {
            self.handle.close();
            if self.thread.join().is_err() {
                tracing::warn!("signal relay thread panicked");
            }
            leave();
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use super::ChildHandle;

    /// No-op relay for targets without POSIX signals.
    pub(crate) struct SignalRelay;

    impl SignalRelay {
        pub(crate) fn start(
            _child: Arc<dyn ChildHandle>,
            _exited: Arc<AtomicBool>,
        ) -> io::Result<Self> {
            Ok(Self)
        }

        pub(crate) fn stop(self) {}
    }
}

pub(crate) use imp::SignalRelay;

/// Start relaying, or log and carry on without a relay.
pub(crate) fn start(child: &Arc<dyn ChildHandle>, exited: &Arc<AtomicBool>) -> Option<SignalRelay> {
    match SignalRelay::start(Arc::clone(child), Arc::clone(exited)) {
        Ok(relay) => Some(relay),
        Err(err) => {
            tracing::warn!(error = %err, "signal relay unavailable");
            None
        }
    }
}
