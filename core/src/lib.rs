//! Exception-boundary adapter for Bulwark.
//!
//! [`BoundaryAdapter`] runs a callable, catches whatever it raises (a panic or
//! an `Err`), and reduces it to one of four [`ErrorKind`]s plus a bounded
//! message. Code on the far side of the boundary, typically C, only ever sees
//! a return value, a failure flag and an errno.
//!
//! - **`adapter`**: the adapter and its status accessors
//! - **`classify`**: the ordered classification table
//! - **`panic_hook`**: keeps absorbed panics out of stderr
//! - **`errno`**: thread-local `errno` access
//! - **`ffi`**: `extern "C"` accessors

mod adapter;
pub mod classify;
pub mod errno;
pub mod ffi;
pub mod panic_hook;
mod util;

pub use adapter::BoundaryAdapter;
pub use bulwark_types::{ErrorKind, Fault, Sentinel};
pub use panic_hook::{in_boundary, install_quiet_panic_hook};

use bulwark_config::BoundaryConfig;

/// Apply the process-wide parts of `config`.
pub fn apply_process_settings(config: &BoundaryConfig) {
    if config.quiet_panics {
        install_quiet_panic_hook();
    }
}
