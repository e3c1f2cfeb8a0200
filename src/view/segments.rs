//! Offset segments derived from end-terminated index tables.
//!
//! Many containers store file boundaries as `N` ascending offsets where
//! entry `i` starts at `v[i]` and ends where entry `i + 1` starts; the last
//! value only marks the end of the final entry.
//!
//! ```text
//! values:   [ 0 ][ 4 ][ 4 ][ 10 ]
//! segments:  [0,4) [4,4) [4,10)
//! ```

use std::io::{Read, Seek, SeekFrom};

use crate::codec::{ByteOrder, Integer, decode_array};
use crate::utils::{PositionGuard, ReadMode, read_into};
use crate::{Error, Result};

/// A half-open `[start, end)` range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetSegment<T> {
    pub start: T,
    pub end: T,
}

impl<T: Integer> OffsetSegment<T> {
    /// Build a segment, rejecting `start > end`.
    pub fn new(start: T, end: T) -> Result<Self> {
        if start.widen() > end.widen() {
            return Err(Error::DecreasingIndex {
                index: 0,
                start: start.widen(),
                end: end.widen(),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of units covered.
    pub fn len(&self) -> u64 {
        (self.end.widen() - self.start.widen()) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Turn `N` index values into `N - 1` segments.
///
/// A single value yields no segments. An empty slice and a decreasing pair
/// are errors; the latter reports the index of the pair's first element.
pub fn segments_from_end_terminated<T: Integer>(values: &[T]) -> Result<Vec<OffsetSegment<T>>> {
    if values.is_empty() {
        return Err(Error::InvalidArgument("end-terminated index array is empty"));
    }
    values
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (start, end) = (pair[0], pair[1]);
            if start.widen() > end.widen() {
                return Err(Error::DecreasingIndex {
                    index,
                    start: start.widen(),
                    end: end.widen(),
                });
            }
            Ok(OffsetSegment { start, end })
        })
        .collect()
}

/// Read `count` index values of type `T` at `offset` and derive segments.
///
/// The stream position is restored afterwards. A `count` the stream cannot
/// hold is reported as [`Error::ShortRead`] before any buffer is allocated.
pub fn read_end_terminated<T: Integer, R: Read + Seek + ?Sized>(
    r: &mut R,
    offset: u64,
    count: usize,
    order: ByteOrder,
) -> Result<Vec<OffsetSegment<T>>> {
    if count == 0 {
        return Err(Error::InvalidArgument("end-terminated index array is empty"));
    }
    let bytes = count
        .checked_mul(T::SIZE)
        .ok_or(Error::InvalidArgument("end-terminated index array is too large"))?;

    // Check the length against the stream before trusting it with an allocation.
    let mut guard = PositionGuard::new(r)?;
    let available = guard.seek(SeekFrom::End(0))?.saturating_sub(offset);
    if (bytes as u64) > available {
        let read = available as usize;
        guard.restore()?;
        return Err(Error::ShortRead {
            read,
            remaining: bytes - read,
            position: offset,
        });
    }

    let mut raw = vec![0u8; bytes];
    guard.seek(SeekFrom::Start(offset))?;
    read_into(&mut *guard, &mut raw, ReadMode::Strict)?;
    guard.restore()?;
    segments_from_end_terminated(&decode_array::<T>(&raw, order)?)
}
