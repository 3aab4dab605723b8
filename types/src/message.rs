//! Fixed-capacity failure message buffer.
//!
//! Failure messages are written while an allocation failure may be in
//! progress, so they go into an inline byte array rather than a `String`.
//! The buffer always holds valid UTF-8 followed by at least one NUL byte,
//! which lets the same bytes be handed to C callers as a `CStr`.

use std::ffi::CStr;
use std::fmt;
use std::str;

/// Capacity of the buffer used by default adapters, terminator included.
pub const DEFAULT_MESSAGE_CAPACITY: usize = 4096;

/// Smallest accepted capacity. Large enough that the longest code prefix
/// plus the generic fallback description always fit untruncated.
pub const MIN_MESSAGE_CAPACITY: usize = 64;

/// Inline text buffer of `N` bytes, one of which is reserved for the NUL terminator.
///
/// Writes past the end are truncated on a character boundary and recorded in
/// [`is_truncated`](Self::is_truncated); they never fail. Interior NUL bytes are
/// dropped so the C view never ends early.
pub struct MessageBuf<const N: usize = DEFAULT_MESSAGE_CAPACITY> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuf<N> {
    #[must_use]
    pub const fn new() -> Self {
        const {
            assert!(
                N >= MIN_MESSAGE_CAPACITY,
                "MessageBuf capacity below MIN_MESSAGE_CAPACITY"
            );
        }
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Maximum text length in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Zero the used prefix. Bytes past `len` are never written, so the whole
    /// array is zero afterwards.
    pub fn clear(&mut self) {
        self.bytes[..self.len].fill(0);
        self.len = 0;
        self.truncated = false;
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes[..=self.len]).unwrap_or(c"")
    }

    pub fn push_str(&mut self, s: &str) {
        let room = self.capacity() - self.len;
        let mut take = s.len().min(room);
        if take < s.len() {
            self.truncated = true;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
        }
        for &byte in &s.as_bytes()[..take] {
            if byte != 0 {
                self.bytes[self.len] = byte;
                self.len += 1;
            }
        }
    }
}

impl<const N: usize> Default for MessageBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for MessageBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for MessageBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuf")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .field("truncated", &self.truncated)
            .finish()
    }
}
