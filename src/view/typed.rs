//! Typed reinterpretation of byte buffers.

use std::marker::PhantomData;

use super::segments::{OffsetSegment, segments_from_end_terminated};
use crate::codec::array::check_multiple;
use crate::codec::{ByteOrder, Integer, Primitive};
use crate::Result;

/// A read-only view of `bytes` as a sequence of `T` in a given byte order.
///
/// Elements are decoded on access; the view never copies the buffer.
#[derive(Debug, Clone, Copy)]
pub struct TypedView<'a, T> {
    bytes: &'a [u8],
    order: ByteOrder,
    _marker: PhantomData<T>,
}

impl<'a, T: Primitive> TypedView<'a, T> {
    /// View `bytes`, which must hold a whole number of elements.
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Result<Self> {
        check_multiple::<T>(bytes.len())?;
        Ok(Self {
            bytes,
            order,
            _marker: PhantomData,
        })
    }

    /// View the longest prefix of `bytes` holding whole elements.
    pub fn truncating(bytes: &'a [u8], order: ByteOrder) -> Self {
        let whole = bytes.len() / T::SIZE * T::SIZE;
        Self {
            bytes: &bytes[..whole],
            order,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / T::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Element `index`, or [`None`] past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        let start = index.checked_mul(T::SIZE)?;
        let window = self.bytes.get(start..start.checked_add(T::SIZE)?)?;
        Some(T::from_ne_slice(window).to_order(self.order))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> {
        let order = self.order;
        self.bytes
            .chunks_exact(T::SIZE)
            .map(move |c| T::from_ne_slice(c).to_order(order))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Integer> TypedView<'_, T> {
    /// Advance `index` while elements equal `to_skip`; see
    /// [`crate::view::skip_while`].
    pub fn skip_while(&self, index: &mut usize, to_skip: T) -> Option<T> {
        while let Some(value) = self.get(*index) {
            if value != to_skip {
                return Some(value);
            }
            *index += 1;
        }
        None
    }

    /// Advance `index` until an element equals `target`.
    pub fn skip_until(&self, index: &mut usize, target: T) -> bool {
        while let Some(value) = self.get(*index) {
            if value == target {
                return true;
            }
            *index += 1;
        }
        false
    }

    /// Advance `index` past zero elements.
    pub fn skip_until_nonzero(&self, index: &mut usize) -> Option<T> {
        self.skip_while(index, T::ZERO)
    }

    /// Treat the view as an end-terminated index table.
    pub fn segments(&self) -> Result<Vec<OffsetSegment<T>>> {
        segments_from_end_terminated(&self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::codec::Half;

    #[test]
    fn get_and_iter() {
        let bytes = [0x00u8, 0x01, 0xFF, 0xFF, 0x12, 0x34];
        let view = TypedView::<i16>::new(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(0), Some(1));
        assert_eq!(view.get(1), Some(-1));
        assert_eq!(view.get(3), None);
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![1, -1, 0x1234]);
        assert_eq!(view.to_vec(), vec![1, -1, 0x1234]);
    }

    #[test]
    fn length_must_be_whole() {
        assert!(TypedView::<u32>::new(&[0u8; 5], ByteOrder::Little).is_err());
        let view = TypedView::<u32>::truncating(&[0u8; 5], ByteOrder::Little);
        assert_eq!(view.len(), 1);
        assert_eq!(view.as_bytes().len(), 4);
    }

    #[test]
    fn scanning() {
        let bytes = [0u8, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0];
        let view = TypedView::<u32>::new(&bytes, ByteOrder::Little).unwrap();
        let mut i = 0;
        assert_eq!(view.skip_until_nonzero(&mut i), Some(5));
        assert_eq!(i, 1);
        assert!(view.skip_until(&mut i, 9));
        assert_eq!(i, 3);
        i += 1;
        assert_eq!(view.skip_while(&mut i, 0), None);
        assert_eq!(i, 4);
    }

    #[test]
    fn index_table_segments() {
        let bytes = [0u8, 0, 0, 4, 0, 4, 0, 10];
        let view = TypedView::<u16>::new(&bytes, ByteOrder::Big).unwrap();
        let segs = view.segments().unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!((segs[2].start, segs[2].end), (4, 10));

        let bad = [0u8, 0, 0, 5, 0, 3];
        let view = TypedView::<u16>::new(&bad, ByteOrder::Big).unwrap();
        assert!(matches!(
            view.segments(),
            Err(Error::DecreasingIndex { index: 1, .. })
        ));
    }

    #[test]
    fn half_view() {
        let bytes = [0x3Cu8, 0x00, 0x7C, 0x00];
        let view = TypedView::<Half>::new(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(view.get(0).map(Half::to_f32), Some(1.0));
        assert!(view.get(1).is_some_and(Half::is_infinite));
    }
}
