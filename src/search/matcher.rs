//! Boundary-safe byte-pattern search over seekable streams.
//!
//! ## Window
//! The matcher reads the stream into a window of `max(min_buffer,
//! pattern.len())` bytes. On every refill after the first, the last
//! `pattern.len() - 1` bytes of the old window are moved to the front before
//! new bytes are appended, so a match straddling two reads is still seen:
//!
//! ```text
//! refill n:    [ .......... scanned ..........][carry]
//! refill n+1:                                  [carry][ new bytes ... ]
//! ```
//!
//! Each candidate start is compared byte for byte and the scan advances by
//! exactly one byte, so overlapping matches are all reported.
//!
//! ## Range
//! Reported offsets satisfy `offset_lo <= offset < offset_hi`. A match may
//! run past `offset_hi`; only its start is bounded. Reading stops at
//! `offset_hi + pattern.len() - 1` or end of stream.

use std::io::{Read, Seek, SeekFrom};

use crate::config::Config;
use crate::utils::{read_full, restore_or_warn};
use crate::{Error, Result};

/// Lazy iterator over match offsets in a stream.
///
/// Each call to [`Iterator::next`] reads only as much of the stream as it
/// needs to find the next match. The stream is returned to its original
/// position when the iterator is dropped. After an error the iterator is
/// fused.
pub struct Matches<'a, R: Read + Seek + ?Sized> {
    stream: &'a mut R,
    saved: u64,
    pattern: Vec<u8>,
    window: Vec<u8>,
    len: usize,
    base: u64,
    scan: usize,
    read_cursor: u64,
    read_limit: u64,
    offset_hi: u64,
    started: bool,
    exhausted: bool,
    done: bool,
}

impl<'a, R: Read + Seek + ?Sized> Matches<'a, R> {
    /// Search `stream` for `pattern` starting anywhere in
    /// `[offset_lo, offset_hi)`.
    ///
    /// `min_buffer` is raised to the pattern length if smaller.
    pub fn new(
        stream: &'a mut R,
        offset_lo: u64,
        offset_hi: u64,
        pattern: &[u8],
        min_buffer: usize,
    ) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidArgument("search pattern is empty"));
        }
        if offset_lo > offset_hi {
            return Err(Error::InvalidArgument("search range start is past its end"));
        }
        let saved = stream.stream_position()?;
        let capacity = min_buffer.max(pattern.len());
        Ok(Self {
            stream,
            saved,
            pattern: pattern.to_vec(),
            window: vec![0u8; capacity],
            len: 0,
            base: offset_lo,
            scan: 0,
            read_cursor: offset_lo,
            read_limit: offset_hi.saturating_add(pattern.len() as u64 - 1),
            offset_hi,
            started: false,
            exhausted: false,
            done: offset_lo == offset_hi,
        })
    }

    /// Capacity of the internal window.
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Slide the carry to the front and append fresh bytes.
    fn refill(&mut self) -> Result<()> {
        let carried = if self.started {
            let keep = (self.pattern.len() - 1).min(self.len);
            self.window.copy_within(self.len - keep..self.len, 0);
            self.base += (self.len - keep) as u64;
            keep
        } else {
            self.started = true;
            0
        };
        self.len = carried;
        self.scan = 0;

        let room = self.window.len() - carried;
        let remaining = usize::try_from(self.read_limit - self.read_cursor).unwrap_or(usize::MAX);
        let want = room.min(remaining);
        if want == 0 {
            self.exhausted = true;
            return Ok(());
        }

        self.stream.seek(SeekFrom::Start(self.read_cursor))?;
        let read = read_full(&mut *self.stream, &mut self.window[carried..carried + want])?;
        self.len += read;
        self.read_cursor += read as u64;
        if read < want || self.read_cursor >= self.read_limit {
            self.exhausted = true;
        }
        tracing::trace!(base = self.base, len = self.len, carried, "matcher window refilled");
        Ok(())
    }
}

impl<R: Read + Seek + ?Sized> Iterator for Matches<'_, R> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let plen = self.pattern.len();
        loop {
            while self.scan + plen <= self.len {
                let p = self.scan;
                let absolute = self.base + p as u64;
                if absolute >= self.offset_hi {
                    self.done = true;
                    return None;
                }
                self.scan += 1;
                if self.window[p..p + plen] == self.pattern[..] {
                    return Some(Ok(absolute));
                }
            }
            if self.exhausted {
                self.done = true;
                return None;
            }
            if let Err(e) = self.refill() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

impl<R: Read + Seek + ?Sized> Drop for Matches<'_, R> {
    fn drop(&mut self) {
        restore_or_warn(&mut *self.stream, self.saved);
    }
}

/// Iterate over every occurrence of `pattern` starting in
/// `[offset_lo, offset_hi)`.
pub fn matches<'a, R: Read + Seek + ?Sized>(
    stream: &'a mut R,
    offset_lo: u64,
    offset_hi: u64,
    pattern: &[u8],
    min_buffer: usize,
) -> Result<Matches<'a, R>> {
    Matches::new(stream, offset_lo, offset_hi, pattern, min_buffer)
}

/// [`matches`] with the window size taken from `config`.
pub fn matches_with_config<'a, R: Read + Seek + ?Sized>(
    stream: &'a mut R,
    offset_lo: u64,
    offset_hi: u64,
    pattern: &[u8],
    config: &Config,
) -> Result<Matches<'a, R>> {
    Matches::new(stream, offset_lo, offset_hi, pattern, config.scan_buffer)
}

/// Offset of the first match, scanning only as far as needed.
pub fn first_match<R: Read + Seek + ?Sized>(
    stream: &mut R,
    offset_lo: u64,
    offset_hi: u64,
    pattern: &[u8],
    min_buffer: usize,
) -> Result<Option<u64>> {
    matches(stream, offset_lo, offset_hi, pattern, min_buffer)?
        .next()
        .transpose()
}

/// Offset of the last match; always scans the whole range.
pub fn last_match<R: Read + Seek + ?Sized>(
    stream: &mut R,
    offset_lo: u64,
    offset_hi: u64,
    pattern: &[u8],
    min_buffer: usize,
) -> Result<Option<u64>> {
    let mut last = None;
    for found in matches(stream, offset_lo, offset_hi, pattern, min_buffer)? {
        last = Some(found?);
    }
    Ok(last)
}

/// Zero-copy matcher over contiguous memory.
///
/// Same contract as [`Matches`], with `usize` offsets into the haystack.
#[derive(Debug, Clone)]
pub struct SliceMatches<'h, 'p> {
    haystack: &'h [u8],
    pattern: &'p [u8],
    pos: usize,
    end: usize,
}

impl Iterator for SliceMatches<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.end {
            let p = self.pos;
            self.pos += 1;
            if self.haystack[p..p + self.pattern.len()] == *self.pattern {
                return Some(p);
            }
        }
        None
    }
}

/// Iterate over occurrences of `pattern` in `haystack` starting in
/// `[offset_lo, offset_hi)`.
pub fn matches_in<'h, 'p>(
    haystack: &'h [u8],
    offset_lo: usize,
    offset_hi: usize,
    pattern: &'p [u8],
) -> Result<SliceMatches<'h, 'p>> {
    if pattern.is_empty() {
        return Err(Error::InvalidArgument("search pattern is empty"));
    }
    if offset_lo > offset_hi {
        return Err(Error::InvalidArgument("search range start is past its end"));
    }
    // Last start at which the whole pattern still fits.
    let fit = (haystack.len() + 1).saturating_sub(pattern.len());
    Ok(SliceMatches {
        haystack,
        pattern,
        pos: offset_lo,
        end: offset_hi.min(fit),
    })
}
