use std::fmt;

use serde::Serialize;

/// The four failure categories reported across the boundary.
///
/// Code names are stable and appear verbatim as the prefix of every failure
/// message (`"RANGE_ERROR: ..."`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Allocation or memory exhaustion.
    OutOfMemory,
    /// A length or capacity exceeded a hard limit.
    RangeError,
    /// Out-of-bounds index or missing key.
    NotFound,
    /// Catch-all for everything else, descriptive or not.
    UnsupportedOperation,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::OutOfMemory,
        ErrorKind::RangeError,
        ErrorKind::NotFound,
        ErrorKind::UnsupportedOperation,
    ];

    #[must_use]
    pub const fn code_name(self) -> &'static str {
        match self {
            ErrorKind::OutOfMemory => "OUT_OF_MEMORY",
            ErrorKind::RangeError => "RANGE_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::UnsupportedOperation => "UNSUPPORTED_OPERATION",
        }
    }

    /// POSIX errno for C callers: `ENOMEM`, `ERANGE`, `ENOENT`, `ENOSYS`.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            ErrorKind::OutOfMemory => libc::ENOMEM,
            ErrorKind::RangeError => libc::ERANGE,
            ErrorKind::NotFound => libc::ENOENT,
            ErrorKind::UnsupportedOperation => libc::ENOSYS,
        }
    }

    #[must_use]
    pub fn from_errno(errno: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.errno() == errno)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_name())
    }
}
