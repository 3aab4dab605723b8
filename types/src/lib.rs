//! Core domain types for Bulwark.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer, including code that runs inside a
//! boundary call while an allocation failure is being reported.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod fault;
mod kind;
mod message;
mod sentinel;

pub use fault::Fault;
pub use kind::ErrorKind;
pub use message::{DEFAULT_MESSAGE_CAPACITY, MIN_MESSAGE_CAPACITY, MessageBuf};
pub use sentinel::Sentinel;

/// Description used when a failure carries nothing printable.
pub const UNKNOWN_DESCRIPTION: &str = "caught unknown exception";
