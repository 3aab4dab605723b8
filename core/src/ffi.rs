//! C ABI surface.
//!
//! Exported Rust functions own a heap-allocated [`BoundaryAdapter`], run their
//! work through it, and C callers read the outcome back with the accessors
//! below. Every function accepts a null adapter pointer and reports a clean
//! state for it. None of them unwind.

use std::ffi::{c_char, c_int};
use std::ptr;

use bulwark_types::Fault;

use crate::BoundaryAdapter;
use crate::errno::set_errno;

/// Allocate a default adapter. Release it with [`bulwark_adapter_free`].
#[unsafe(no_mangle)]
pub extern "C" fn bulwark_adapter_new() -> *mut BoundaryAdapter {
    Box::into_raw(Box::new(BoundaryAdapter::new()))
}

/// # Safety
///
/// `adapter` must be null or a pointer returned by [`bulwark_adapter_new`]
/// that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bulwark_adapter_free(adapter: *mut BoundaryAdapter) {
    if !adapter.is_null() {
        // SAFETY: the pointer came from `Box::into_raw` in `bulwark_adapter_new`.
        drop(unsafe { Box::from_raw(adapter) });
    }
}

/// # Safety
///
/// `adapter` must be null or point to a live adapter.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bulwark_adapter_has_failed(adapter: *const BoundaryAdapter) -> bool {
    // SAFETY: caller guarantees the pointer is null or valid.
    unsafe { adapter.as_ref() }.is_some_and(|adapter| adapter.has_failed())
}

/// The last failure message, or null when the last call succeeded.
///
/// # Safety
///
/// `adapter` must be null or point to a live adapter. The returned pointer is
/// valid until the next invocation on, or release of, that adapter.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bulwark_adapter_last_error_message(
    adapter: *const BoundaryAdapter,
) -> *const c_char {
    // SAFETY: caller guarantees the pointer is null or valid.
    unsafe { adapter.as_ref() }
        .and_then(|adapter| adapter.last_error_c_str())
        .map_or(ptr::null(), |message| message.as_ptr())
}

/// The errno of the last failure, or 0 when the last call succeeded.
///
/// # Safety
///
/// `adapter` must be null or point to a live adapter.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bulwark_adapter_last_errno(adapter: *const BoundaryAdapter) -> c_int {
    // SAFETY: caller guarantees the pointer is null or valid.
    unsafe { adapter.as_ref() }
        .and_then(|adapter| adapter.last_errno())
        .unwrap_or(0)
}

/// Integer division through `adapter`.
///
/// Returns the quotient, or -1 with `errno` set to `ERANGE` when the divisor
/// is zero or the quotient overflows. A null adapter yields -1 with `EINVAL`.
///
/// # Safety
///
/// `adapter` must be null or point to a live adapter not used concurrently
/// by another thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bulwark_divide(
    adapter: *mut BoundaryAdapter,
    dividend: c_int,
    divisor: c_int,
) -> c_int {
    // SAFETY: caller guarantees the pointer is null or valid and unaliased.
    let Some(adapter) = (unsafe { adapter.as_mut() }) else {
        set_errno(libc::EINVAL);
        return -1;
    };
    let quotient = adapter.invoke(|| divide(dividend, divisor));
    adapter.set_errno_from_last();
    quotient
}

fn divide(dividend: c_int, divisor: c_int) -> c_int {
    dividend
        .checked_div(divisor)
        .unwrap_or_else(|| Fault::range(format!("cannot divide {dividend} by {divisor}")).raise())
}
