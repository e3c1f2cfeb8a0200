//! Low-level stream primitives shared by the codec, view and search layers.
//!
//! Reads come in two flavours selected by [`ReadMode`]: strict reads either
//! fill the whole buffer or fail with [`Error::ShortRead`], lenient reads
//! return however many bytes the stream had left.
//!
//! Any helper that repositions a stream to read at an absolute offset does so
//! through a [`PositionGuard`], so the caller's position is back where it was
//! on every exit path.

use std::io::{self, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

use crate::{Error, Result};

/// How to treat a read that hits end of stream early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Fail with [`Error::ShortRead`].
    #[default]
    Strict,
    /// Return the partial count.
    Lenient,
}

/// Read until `buf` is full or the stream ends.
///
/// Returns the number of bytes placed in `buf`. `Interrupted` errors are
/// retried like [`Read::read_exact`] does; any other error propagates.
pub fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read `buf.len()` bytes from the current position under `mode`.
pub fn read_into<R: Read + Seek + ?Sized>(
    r: &mut R,
    buf: &mut [u8],
    mode: ReadMode,
) -> Result<usize> {
    let position = r.stream_position()?;
    let read = read_full(r, buf)?;
    if read < buf.len() && mode == ReadMode::Strict {
        return Err(Error::ShortRead {
            read,
            remaining: buf.len() - read,
            position,
        });
    }
    Ok(read)
}

/// Read `buf.len()` bytes at absolute `offset`, then restore the position.
pub fn read_at<R: Read + Seek + ?Sized>(
    r: &mut R,
    offset: u64,
    buf: &mut [u8],
    mode: ReadMode,
) -> Result<usize> {
    let mut guard = PositionGuard::new(r)?;
    guard.seek(SeekFrom::Start(offset))?;
    let read = read_into(&mut *guard, buf, mode)?;
    guard.restore()?;
    Ok(read)
}

/// Scope guard that puts a stream back at its saved position when dropped.
///
/// Dereferences to the wrapped stream so it can be read and seeked freely in
/// the meantime. Prefer [`PositionGuard::restore`] on the success path: it
/// reports seek failures, whereas the drop path can only log them.
pub struct PositionGuard<'a, S: Seek + ?Sized> {
    inner: &'a mut S,
    saved: u64,
    armed: bool,
}

impl<'a, S: Seek + ?Sized> PositionGuard<'a, S> {
    /// Record the current position of `inner`.
    pub fn new(inner: &'a mut S) -> Result<Self> {
        let saved = inner.stream_position()?;
        Ok(Self {
            inner,
            saved,
            armed: true,
        })
    }

    /// The position that will be restored.
    pub fn saved(&self) -> u64 {
        self.saved
    }

    /// Restore the saved position now and disarm the guard.
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.inner.seek(SeekFrom::Start(self.saved))?;
        Ok(())
    }
}

impl<S: Seek + ?Sized> Deref for PositionGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.inner
    }
}

impl<S: Seek + ?Sized> DerefMut for PositionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.inner
    }
}

impl<S: Seek + ?Sized> Drop for PositionGuard<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            restore_or_warn(&mut *self.inner, self.saved);
        }
    }
}

/// Seek back to `saved`, logging instead of failing; for use in `Drop`.
pub(crate) fn restore_or_warn<S: Seek + ?Sized>(inner: &mut S, saved: u64) {
    if let Err(e) = inner.seek(SeekFrom::Start(saved)) {
        tracing::warn!(position = saved, error = %e, "failed to restore stream position");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn strict_short_read_reports_counts_and_position() {
        let mut c = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        c.set_position(3);
        let mut buf = [0u8; 4];
        match read_into(&mut c, &mut buf, ReadMode::Strict) {
            Err(Error::ShortRead {
                read,
                remaining,
                position,
            }) => {
                assert_eq!((read, remaining, position), (2, 2, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn lenient_short_read_returns_partial_count() {
        let mut c = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(read_into(&mut c, &mut buf, ReadMode::Lenient).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn read_at_restores_position_on_success_and_error() {
        let mut c = Cursor::new((0u8..16).collect::<Vec<_>>());
        c.set_position(5);

        let mut buf = [0u8; 2];
        read_at(&mut c, 10, &mut buf, ReadMode::Strict).unwrap();
        assert_eq!(buf, [10, 11]);
        assert_eq!(c.position(), 5);

        let mut big = [0u8; 8];
        assert!(read_at(&mut c, 12, &mut big, ReadMode::Strict).is_err());
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn guard_restores_on_drop() {
        let mut c = Cursor::new(vec![0u8; 32]);
        c.set_position(7);
        {
            let mut g = PositionGuard::new(&mut c).unwrap();
            g.seek(SeekFrom::Start(20)).unwrap();
            assert_eq!(g.saved(), 7);
        }
        assert_eq!(c.position(), 7);
    }
}
