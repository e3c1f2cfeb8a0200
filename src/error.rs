//! Library-wide error and result types.

use std::io;

use crate::transform::Strategy;

/// Result alias used throughout binkit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Every variant is either a precondition violation on the caller's side or
/// a malformed-input condition; nothing here is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A strict read could not be satisfied by the stream.
    #[error("short read: got {read} bytes, {remaining} missing at position {position}")]
    ShortRead {
        /// Bytes actually read before end of stream.
        read: usize,
        /// Bytes still missing from the request.
        remaining: usize,
        /// Stream position where the read started.
        position: u64,
    },
    /// An argument was rejected (message describes which one).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An input or output buffer is shorter than the operation needs.
    #[error("buffer too small: need {required} bytes, have {actual}")]
    BufferTooSmall { required: usize, actual: usize },
    /// A raw byte-order tag was neither little (0) nor big (1).
    #[error("invalid byte order tag: {0}")]
    InvalidByteOrder(u8),
    /// An end-terminated index array has an entry followed by a smaller one.
    #[error("decreasing index at {index}: {start} is followed by {end}")]
    DecreasingIndex { index: usize, start: i128, end: i128 },
    /// A vectorized strategy was requested on a CPU that lacks it.
    #[error("transform strategy {0} is not supported on this CPU")]
    UnsupportedStrategy(Strategy),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
