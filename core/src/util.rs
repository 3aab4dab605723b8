//! Small helpers shared by the adapter and the classifier.

use std::panic::{self, AssertUnwindSafe};

/// Drop `value`, swallowing a panic raised by its destructor.
///
/// Panic payloads and error values come from arbitrary code, and their `Drop`
/// impls run after the boundary has already caught one unwind.
pub(crate) fn drop_quietly<T>(value: T) {
    let _ = panic::catch_unwind(AssertUnwindSafe(move || drop(value)));
}
