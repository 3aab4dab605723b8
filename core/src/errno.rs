//! Thread-local `errno` access for C callers.

use std::ffi::c_int;
use std::io;

#[cfg(target_os = "linux")]
fn errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__errno_location() })
}

#[cfg(target_os = "android")]
fn errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__errno() })
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly"
))]
fn errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__error() })
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly"
)))]
fn errno_location() -> Option<*mut c_int> {
    None
}

/// Store `value` in the calling thread's `errno`.
///
/// Returns `false` on platforms where `errno` cannot be written.
pub fn set_errno(value: c_int) -> bool {
    match errno_location() {
        Some(location) => {
            // SAFETY: the libc accessor returns a valid pointer to this thread's errno.
            unsafe { *location = value };
            true
        }
        None => false,
    }
}

/// Read the calling thread's `errno`.
#[must_use]
pub fn errno() -> c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
