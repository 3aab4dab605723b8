//! The boundary adapter.
//!
//! # Lifecycle
//!
//! ```text
//! new() -> Clean --invoke--> Clean   (callable returned)
//!                 \--invoke--> Failed (callable panicked or returned Err)
//! Failed --invoke--> Clean | Failed
//! ```
//!
//! Every invocation starts by returning to Clean, so the status accessors only
//! ever describe the latest call. There is no terminal state.
//!
//! # Threading
//!
//! Invocations take `&mut self`. An adapter shared between threads therefore
//! has to sit behind a lock, and the common case is one adapter per thread.
//!
//! # Unwinding
//!
//! Panics are caught with `catch_unwind`, so a build with `panic = "abort"`
//! never reaches the classification step.

use std::error::Error as StdError;
use std::ffi::CStr;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use bulwark_config::BoundaryConfig;
use bulwark_types::{DEFAULT_MESSAGE_CAPACITY, ErrorKind, MessageBuf, Sentinel};

use crate::classify::{Raised, describe_into};
use crate::errno::set_errno;
use crate::panic_hook::BoundaryGuard;
use crate::util::drop_quietly;

/// Runs callables and turns whatever they raise into an error code and message.
///
/// ```
/// use bulwark_core::BoundaryAdapter;
/// use bulwark_types::{ErrorKind, Fault};
///
/// fn divide(a: i32, b: i32) -> i32 {
///     a.checked_div(b)
///         .unwrap_or_else(|| Fault::range("division by zero").raise())
/// }
///
/// let mut adapter = BoundaryAdapter::new();
///
/// assert_eq!(adapter.invoke(|| divide(84, 2)), 42);
/// assert!(!adapter.has_failed());
///
/// assert_eq!(adapter.invoke(|| divide(1, 0)), -1);
/// assert!(adapter.has_failed());
/// assert_eq!(adapter.last_error_kind(), Some(ErrorKind::RangeError));
/// assert_eq!(adapter.last_error_message(), Some("RANGE_ERROR: division by zero"));
/// ```
///
/// Invoking through a shared reference does not compile:
///
/// ```compile_fail
/// use bulwark_core::BoundaryAdapter;
///
/// let adapter = BoundaryAdapter::new();
/// let shared = &adapter;
/// shared.invoke(|| 1_i32);
/// ```
pub struct BoundaryAdapter<const N: usize = DEFAULT_MESSAGE_CAPACITY> {
    failed: bool,
    kind: Option<ErrorKind>,
    message: MessageBuf<N>,
    log_failures: bool,
}

impl BoundaryAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_message_capacity()
    }

    #[must_use]
    pub const fn from_config(config: &BoundaryConfig) -> Self {
        Self::with_message_capacity().with_failure_logging(config.log_failures)
    }
}

impl<const N: usize> BoundaryAdapter<N> {
    /// An adapter whose message buffer holds `N` bytes, terminator included.
    #[must_use]
    pub const fn with_message_capacity() -> Self {
        Self {
            failed: false,
            kind: None,
            message: MessageBuf::new(),
            log_failures: true,
        }
    }

    pub const fn with_failure_logging(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Run `f` and return its result, or `R::sentinel()` if it panics.
    ///
    /// Arguments are bound by the closure, so the adapter never sees or copies
    /// them. Check [`has_failed`](Self::has_failed) afterwards: the sentinel
    /// may be a legitimate result.
    pub fn invoke<R, F>(&mut self, f: F) -> R
    where
        R: Sentinel,
        F: FnOnce() -> R,
    {
        self.run(f, R::sentinel)
    }

    /// Like [`invoke`](Self::invoke), returning `fallback` on failure. For
    /// return types with no natural sentinel.
    pub fn invoke_or<R, F>(&mut self, f: F, fallback: R) -> R
    where
        F: FnOnce() -> R,
    {
        self.run(f, move || fallback)
    }

    /// Run a callable that reports failure through `Result`.
    ///
    /// `Err` is classified exactly as a panic carrying the same error would
    /// be; panics are handled as in [`invoke`](Self::invoke).
    pub fn invoke_fallible<T, E, F>(&mut self, f: F) -> T
    where
        T: Sentinel,
        E: StdError + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        match self.run(|| f().map_err(Some), || Err(None)) {
            Ok(value) => value,
            Err(Some(err)) => {
                {
                    let _guard = BoundaryGuard::enter();
                    self.record(&Raised::Error(&err));
                }
                drop_quietly(err);
                T::sentinel()
            }
            Err(None) => T::sentinel(),
        }
    }

    fn run<R>(&mut self, f: impl FnOnce() -> R, fallback: impl FnOnce() -> R) -> R {
        self.reset();
        let outcome = {
            let _guard = BoundaryGuard::enter();
            panic::catch_unwind(AssertUnwindSafe(f))
        };
        match outcome {
            Ok(value) => value,
            Err(payload) => {
                {
                    let _guard = BoundaryGuard::enter();
                    self.record(&Raised::from_payload(&*payload));
                }
                drop_quietly(payload);
                fallback()
            }
        }
    }

    fn reset(&mut self) {
        self.failed = false;
        self.kind = None;
        self.message.clear();
    }

    fn record(&mut self, raised: &Raised<'_>) {
        let kind = describe_into(raised, &mut self.message);
        self.failed = true;
        self.kind = Some(kind);
        if self.log_failures {
            tracing::debug!(
                kind = kind.code_name(),
                errno = kind.errno(),
                truncated = self.message.is_truncated(),
                message = self.message.as_str(),
                "Absorbed failure at boundary"
            );
        }
    }

    /// Whether the most recent invocation failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// `"<CODE_NAME>: <description>"` for the most recent invocation, if it failed.
    #[must_use]
    pub fn last_error_message(&self) -> Option<&str> {
        self.failed.then(|| self.message.as_str())
    }

    /// The message as a NUL-terminated C string, if the last invocation failed.
    #[must_use]
    pub fn last_error_c_str(&self) -> Option<&CStr> {
        self.failed.then(|| self.message.as_c_str())
    }

    #[must_use]
    pub const fn last_error_kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    #[must_use]
    pub fn last_errno(&self) -> Option<i32> {
        self.kind.map(ErrorKind::errno)
    }

    /// Whether the last failure message was cut to fit the buffer.
    #[must_use]
    pub const fn message_truncated(&self) -> bool {
        self.failed && self.message.is_truncated()
    }

    /// Copy the last failure's errno into the thread's `errno`.
    ///
    /// Does nothing and returns `false` when the last invocation succeeded.
    pub fn set_errno_from_last(&self) -> bool {
        self.last_errno().is_some_and(set_errno)
    }
}

impl<const N: usize> Default for BoundaryAdapter<N> {
    fn default() -> Self {
        Self::with_message_capacity()
    }
}

impl<const N: usize> fmt::Debug for BoundaryAdapter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryAdapter")
            .field("failed", &self.failed)
            .field("kind", &self.kind)
            .field("message", &self.last_error_message())
            .field("log_failures", &self.log_failures)
            .finish()
    }
}
