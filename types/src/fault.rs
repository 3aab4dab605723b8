use std::borrow::Cow;
use std::panic;

use thiserror::Error;

use crate::ErrorKind;

/// A failure that states its own category.
///
/// Internal code returns a `Fault` through `Result`, or raises it as a panic
/// payload with [`Fault::raise`], when it wants a specific classification at
/// the boundary instead of relying on message inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("{0}")]
    OutOfMemory(Cow<'static, str>),
    #[error("{0}")]
    Range(Cow<'static, str>),
    #[error("{0}")]
    NotFound(Cow<'static, str>),
    #[error("{0}")]
    Unsupported(Cow<'static, str>),
}

impl Fault {
    pub fn out_of_memory(description: impl Into<Cow<'static, str>>) -> Self {
        Self::OutOfMemory(description.into())
    }

    pub fn range(description: impl Into<Cow<'static, str>>) -> Self {
        Self::Range(description.into())
    }

    pub fn not_found(description: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(description.into())
    }

    pub fn unsupported(description: impl Into<Cow<'static, str>>) -> Self {
        Self::Unsupported(description.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Fault::OutOfMemory(_) => ErrorKind::OutOfMemory,
            Fault::Range(_) => ErrorKind::RangeError,
            Fault::NotFound(_) => ErrorKind::NotFound,
            Fault::Unsupported(_) => ErrorKind::UnsupportedOperation,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Fault::OutOfMemory(d) | Fault::Range(d) | Fault::NotFound(d) | Fault::Unsupported(d) => d,
        }
    }

    /// Unwind with this fault as the panic payload.
    pub fn raise(self) -> ! {
        panic::panic_any(self)
    }
}
