//! Keeping absorbed panics out of stderr.
//!
//! `catch_unwind` does not stop the process panic hook from running, so by
//! default every panic an adapter absorbs is still printed. The quiet hook
//! reports those panics through `tracing` instead and hands every other
//! panic to whatever hook was installed before it.

use std::cell::Cell;
use std::marker::PhantomData;
use std::panic;
use std::sync::Once;

thread_local! {
    static BOUNDARY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static INSTALL: Once = Once::new();

/// Marks the current thread as running inside an adapter invocation.
///
/// The mark is a depth counter so nested adapters compose; the guard restores
/// it on drop, including when the callable unwinds past it.
pub(crate) struct BoundaryGuard {
    // Thread-local bookkeeping: the guard must be dropped on the thread that made it.
    _not_send: PhantomData<*const ()>,
}

impl BoundaryGuard {
    pub(crate) fn enter() -> Self {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for BoundaryGuard {
    fn drop(&mut self) {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Whether the current thread is inside an adapter invocation.
#[must_use]
pub fn in_boundary() -> bool {
    BOUNDARY_DEPTH.with(|depth| depth.get() > 0)
}

/// Install the quiet panic hook. Later calls are no-ops.
pub fn install_quiet_panic_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if in_boundary() {
                tracing::debug!(location = ?info.location(), "Panic absorbed at boundary");
            } else {
                previous(info);
            }
        }));
        tracing::debug!("Quiet panic hook installed");
    });
}

/// Whether [`install_quiet_panic_hook`] has run in this process.
///
/// This only reports the one-time install. It cannot tell whether other code
/// replaced the hook with `std::panic::set_hook` afterwards.
#[must_use]
pub fn quiet_panic_hook_installed() -> bool {
    INSTALL.is_completed()
}
