//! Scanning primitives over integer tables.
//!
//! Container index tables are often sparse: valid rows separated by runs of
//! zero padding or sentinel values. The `skip_*` functions walk such a table
//! one element at a time without materializing it, over either a buffer
//! ([`SliceSource`]) or a seekable stream ([`StreamSource`]).
//!
//! Element `i` lives at byte offset `base + i × T::SIZE`. Scanning stops at
//! the [`Bound`], or earlier if the source runs out; both cases are reported
//! the same way, with `index` left at the first element that was not read.

use std::io::{Read, Seek, SeekFrom};

use crate::codec::{ByteOrder, Integer, Primitive, decode};
use crate::codec::primitive::try_read_value;
use crate::utils::restore_or_warn;
use crate::Result;

/// Where a scan must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// At most this many elements, counted from index 0.
    Count(usize),
    /// No element may extend past this absolute byte offset.
    End(u64),
}

impl Bound {
    #[inline]
    fn allows<T: Primitive>(self, base: u64, index: usize) -> bool {
        match self {
            Bound::Count(n) => index < n,
            Bound::End(end) => element_offset::<T>(base, index)
                .checked_add(T::SIZE as u64)
                .is_some_and(|stop| stop <= end),
        }
    }
}

#[inline]
fn element_offset<T: Primitive>(base: u64, index: usize) -> u64 {
    base.saturating_add((index as u64).saturating_mul(T::SIZE as u64))
}

/// Random access to fixed-width elements by absolute byte offset.
pub trait ElementSource {
    /// Decode the element at `offset`, or [`None`] if the source does not
    /// hold all of its bytes.
    fn read_element<T: Primitive>(&mut self, offset: u64, order: ByteOrder) -> Result<Option<T>>;
}

/// In-memory element source.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl ElementSource for SliceSource<'_> {
    fn read_element<T: Primitive>(&mut self, offset: u64, order: ByteOrder) -> Result<Option<T>> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(None);
        };
        match start
            .checked_add(T::SIZE)
            .and_then(|end| self.bytes.get(start..end))
        {
            Some(window) => decode(window, order).map(Some),
            None => Ok(None),
        }
    }
}

/// Stream-backed element source.
///
/// Consecutive elements are read sequentially without re-seeking. The
/// stream's original position is restored when the source is dropped.
pub struct StreamSource<'a, R: Read + Seek + ?Sized> {
    inner: &'a mut R,
    saved: u64,
    cursor: Option<u64>,
}

impl<'a, R: Read + Seek + ?Sized> StreamSource<'a, R> {
    pub fn new(inner: &'a mut R) -> Result<Self> {
        let saved = inner.stream_position()?;
        Ok(Self {
            inner,
            saved,
            cursor: Some(saved),
        })
    }
}

impl<R: Read + Seek + ?Sized> ElementSource for StreamSource<'_, R> {
    fn read_element<T: Primitive>(&mut self, offset: u64, order: ByteOrder) -> Result<Option<T>> {
        // The cursor is unknown until this read completes.
        if self.cursor.take() != Some(offset) {
            self.inner.seek(SeekFrom::Start(offset))?;
        }
        let value = try_read_value::<T, R>(&mut *self.inner, order)?;
        self.cursor = value.map(|_| offset + T::SIZE as u64);
        Ok(value)
    }
}

impl<R: Read + Seek + ?Sized> Drop for StreamSource<'_, R> {
    fn drop(&mut self) {
        restore_or_warn(&mut *self.inner, self.saved);
    }
}

/// Advance `index` while elements equal `to_skip`.
///
/// Returns the first differing element, leaving `index` on it.
pub fn skip_while<T: Integer, S: ElementSource + ?Sized>(
    source: &mut S,
    base: u64,
    index: &mut usize,
    bound: Bound,
    to_skip: T,
    order: ByteOrder,
) -> Result<Option<T>> {
    while bound.allows::<T>(base, *index) {
        let Some(value) = source.read_element::<T>(element_offset::<T>(base, *index), order)?
        else {
            return Ok(None);
        };
        if value != to_skip {
            return Ok(Some(value));
        }
        *index += 1;
    }
    Ok(None)
}

/// Advance `index` until an element equals `target`.
///
/// Returns `true` with `index` on the match.
pub fn skip_until<T: Integer, S: ElementSource + ?Sized>(
    source: &mut S,
    base: u64,
    index: &mut usize,
    bound: Bound,
    target: T,
    order: ByteOrder,
) -> Result<bool> {
    while bound.allows::<T>(base, *index) {
        match source.read_element::<T>(element_offset::<T>(base, *index), order)? {
            Some(value) if value == target => return Ok(true),
            Some(_) => *index += 1,
            None => return Ok(false),
        }
    }
    Ok(false)
}

/// Advance `index` past zero elements; returns the first non-zero one.
#[inline]
pub fn skip_until_nonzero<T: Integer, S: ElementSource + ?Sized>(
    source: &mut S,
    base: u64,
    index: &mut usize,
    bound: Bound,
    order: ByteOrder,
) -> Result<Option<T>> {
    skip_while(source, base, index, bound, T::ZERO, order)
}
