//! Failure classification.
//!
//! A caught failure is first normalized into a [`Raised`] view, then matched
//! against an ordered rule table. The first rule that matches wins; anything
//! that matches no rule is `UNSUPPORTED_OPERATION`.

use std::any::Any;
use std::collections::TryReserveError;
use std::error::Error as StdError;
use std::fmt::{self, Display, Write};
use std::io;
use std::iter;
use std::panic::{self, AssertUnwindSafe};

use bulwark_types::{ErrorKind, Fault, MessageBuf, UNKNOWN_DESCRIPTION};

use crate::util::drop_quietly;

/// Leading text of std's allocation failure messages.
const ALLOCATION_PREFIXES: &[&str] = &[
    "memory allocation of ",
    "memory allocator returned an error",
];

/// Leading text of std's capacity overflow messages.
const CAPACITY_PREFIXES: &[&str] = &["capacity overflow", "computed capacity exceeded"];

/// Leading text of std's index and key lookup messages.
const LOOKUP_PREFIXES: &[&str] = &["index out of bounds: the len is ", "no entry found for key"];

/// A caught failure, viewed for classification.
#[derive(Clone, Copy)]
pub enum Raised<'a> {
    /// A typed error, returned through `Result` or carried as a panic payload.
    Error(&'a (dyn StdError + 'static)),
    /// A panic with a plain `&str` or `String` payload.
    Message(&'a str),
    /// A panic payload with nothing printable.
    Opaque,
}

impl<'a> Raised<'a> {
    pub fn from_payload(payload: &'a (dyn Any + Send)) -> Self {
        if let Some(fault) = payload.downcast_ref::<Fault>() {
            Raised::Error(fault)
        } else if let Some(err) = payload.downcast_ref::<TryReserveError>() {
            Raised::Error(err)
        } else if let Some(err) = payload.downcast_ref::<io::Error>() {
            Raised::Error(err)
        } else if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
            Raised::Error(&**err)
        } else if let Some(msg) = payload.downcast_ref::<&'static str>() {
            Raised::Message(msg)
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            Raised::Message(msg)
        } else {
            Raised::Opaque
        }
    }

    fn write_description(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Raised::Error(err) => write!(out, "{err}"),
            Raised::Message(msg) => out.write_str(msg),
            Raised::Opaque => out.write_str(UNKNOWN_DESCRIPTION),
        }
    }
}

impl fmt::Debug for Raised<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Error(_) => f.write_str("Raised::Error"),
            Raised::Message(msg) => f.debug_tuple("Raised::Message").field(msg).finish(),
            Raised::Opaque => f.write_str("Raised::Opaque"),
        }
    }
}

struct Rule {
    kind: ErrorKind,
    matches: fn(&Raised<'_>) -> bool,
}

/// Most specific first.
static RULES: [Rule; 3] = [
    Rule {
        kind: ErrorKind::OutOfMemory,
        matches: is_allocation_failure,
    },
    Rule {
        kind: ErrorKind::RangeError,
        matches: is_capacity_violation,
    },
    Rule {
        kind: ErrorKind::NotFound,
        matches: is_lookup_failure,
    },
];

#[must_use]
pub fn classify(raised: &Raised<'_>) -> ErrorKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(raised))
        .map_or(ErrorKind::UnsupportedOperation, |rule| rule.kind)
}

/// Classify `raised` and write `"<CODE_NAME>: <description>"` into `buf`.
///
/// Never unwinds. If classifying or describing fails (a `Display` impl that
/// errors or panics), the buffer is rewritten with the generic catch-all
/// message and `UnsupportedOperation` is returned.
pub fn describe_into<const N: usize>(raised: &Raised<'_>, buf: &mut MessageBuf<N>) -> ErrorKind {
    buf.clear();
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        let kind = classify(raised);
        buf.push_str(kind.code_name());
        buf.push_str(": ");
        raised.write_description(&mut *buf)?;
        Ok::<_, fmt::Error>(kind)
    }));

    match attempt {
        Ok(Ok(kind)) => kind,
        Ok(Err(fmt::Error)) => write_fallback(buf),
        Err(payload) => {
            drop_quietly(payload);
            write_fallback(buf)
        }
    }
}

fn write_fallback<const N: usize>(buf: &mut MessageBuf<N>) -> ErrorKind {
    let kind = ErrorKind::UnsupportedOperation;
    buf.clear();
    buf.push_str(kind.code_name());
    buf.push_str(": ");
    buf.push_str(UNKNOWN_DESCRIPTION);
    kind
}

fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    iter::successors(Some(err), |&err| err.source())
}

fn io_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    err.downcast_ref::<io::Error>().map(io::Error::kind)
}

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| text.starts_with(prefix))
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `range start index 9 out of range for slice of length 4`, and the `end` form.
fn is_slice_range_message(msg: &str) -> bool {
    let Some(rest) = msg
        .strip_prefix("range start index ")
        .or_else(|| msg.strip_prefix("range end index "))
    else {
        return false;
    };
    rest.split_once(" out of range for slice of length ")
        .is_some_and(|(index, len)| is_number(index) && is_number(len))
}

/// The `str` slicing message `byte index 9 is out of bounds of ...`, optionally
/// led by `start` or `end`.
fn is_str_range_message(msg: &str) -> bool {
    let msg = msg
        .strip_prefix("start ")
        .or_else(|| msg.strip_prefix("end "))
        .unwrap_or(msg);
    msg.strip_prefix("byte index ")
        .and_then(|rest| rest.split_once(" is out of bounds of `"))
        .is_some_and(|(index, _)| is_number(index))
}

/// Whether `value`'s `Display` output satisfies `pred`, checked without allocating.
///
/// Only the first 255 bytes of the output are seen by `pred`; anything past
/// that is cut off, so `pred` must look for text near the start.
fn display_matches(value: &dyn Display, pred: impl Fn(&str) -> bool) -> bool {
    let mut scratch = MessageBuf::<256>::new();
    write!(scratch, "{value}").is_ok() && pred(scratch.as_str())
}

/// `TryReserveError` only exposes its cause through `Display` on stable.
fn reserve_overflowed(err: &TryReserveError) -> bool {
    display_matches(err, |text| text.contains("capacity"))
}

fn is_allocation_failure(raised: &Raised<'_>) -> bool {
    match raised {
        Raised::Error(err) => chain(*err).any(|err| {
            matches!(err.downcast_ref::<Fault>(), Some(Fault::OutOfMemory(_)))
                || err
                    .downcast_ref::<TryReserveError>()
                    .is_some_and(|err| !reserve_overflowed(err))
                || io_kind(err) == Some(io::ErrorKind::OutOfMemory)
        }),
        Raised::Message(msg) => starts_with_any(msg, ALLOCATION_PREFIXES),
        Raised::Opaque => false,
    }
}

fn is_capacity_violation(raised: &Raised<'_>) -> bool {
    match raised {
        Raised::Error(err) => chain(*err).any(|err| {
            matches!(err.downcast_ref::<Fault>(), Some(Fault::Range(_)))
                || err
                    .downcast_ref::<TryReserveError>()
                    .is_some_and(reserve_overflowed)
        }),
        Raised::Message(msg) => starts_with_any(msg, CAPACITY_PREFIXES),
        Raised::Opaque => false,
    }
}

fn is_lookup_failure(raised: &Raised<'_>) -> bool {
    match raised {
        Raised::Error(err) => chain(*err).any(|err| {
            matches!(err.downcast_ref::<Fault>(), Some(Fault::NotFound(_)))
                || io_kind(err) == Some(io::ErrorKind::NotFound)
        }),
        Raised::Message(msg) => {
            starts_with_any(msg, LOOKUP_PREFIXES)
                || is_slice_range_message(msg)
                || is_str_range_message(msg)
        }
        Raised::Opaque => false,
    }
}
