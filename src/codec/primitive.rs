//! Fixed-width element codecs.
//!
//! [`Primitive`] is implemented for every 1/2/4/8-byte integer, `f32`,
//! `f64` and [`Half`]. [`Integer`] narrows that to the integer widths, which
//! are the only types the scanning primitives in [`crate::view`] accept.

use std::fmt::Debug;
use std::io::{Read, Seek, Write};

use super::half::Half;
use super::order::ByteOrder;
use crate::utils::{ReadMode, read_at, read_full};
use crate::{Error, Result};

/// A value with a fixed N-byte serialized layout.
pub trait Primitive: Copy + PartialEq + Debug {
    /// Serialized width in bytes.
    const SIZE: usize;
    /// The additive zero (all bits clear for every implementor).
    const ZERO: Self;

    /// Reinterpret exactly [`Self::SIZE`] bytes in host order.
    ///
    /// Callers guarantee `bytes.len() == Self::SIZE`.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    /// Write exactly [`Self::SIZE`] bytes in host order.
    ///
    /// Callers guarantee `out.len() == Self::SIZE`.
    fn write_ne_slice(self, out: &mut [u8]);

    /// Reverse the byte order of the value's representation.
    fn swap_bytes(self) -> Self;

    /// Convert from host order to `order`, or back (the mapping is its own
    /// inverse).
    #[inline]
    fn to_order(self, order: ByteOrder) -> Self {
        if order.needs_swap() {
            self.swap_bytes()
        } else {
            self
        }
    }
}

/// Integer element types usable with the scanning primitives.
pub trait Integer: Primitive + Eq {
    /// Lossless widening, used for error reporting and comparisons across
    /// widths.
    fn widen(self) -> i128;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {$(
        impl Primitive for $t {
            const SIZE: usize = std::mem::size_of::<$t>();
            const ZERO: Self = 0;

            #[inline]
            fn from_ne_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                <$t>::from_ne_bytes(raw)
            }

            #[inline]
            fn write_ne_slice(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                <$t>::swap_bytes(self)
            }
        }

        impl Integer for $t {
            #[inline]
            fn widen(self) -> i128 {
                i128::from(self)
            }
        }
    )*};
}

impl_integer!(u8, i8, u16, i16, u32, i32, u64, i64);

macro_rules! impl_float {
    ($($t:ty => $bits:ty),* $(,)?) => {$(
        impl Primitive for $t {
            const SIZE: usize = std::mem::size_of::<$t>();
            const ZERO: Self = 0.0;

            #[inline]
            fn from_ne_slice(bytes: &[u8]) -> Self {
                <$t>::from_bits(<$bits as Primitive>::from_ne_slice(bytes))
            }

            #[inline]
            fn write_ne_slice(self, out: &mut [u8]) {
                self.to_bits().write_ne_slice(out)
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                <$t>::from_bits(self.to_bits().swap_bytes())
            }
        }
    )*};
}

impl_float!(f32 => u32, f64 => u64);

impl Primitive for Half {
    const SIZE: usize = 2;
    const ZERO: Self = Half::ZERO;

    #[inline]
    fn from_ne_slice(bytes: &[u8]) -> Self {
        Half::from_bits(u16::from_ne_slice(bytes))
    }

    #[inline]
    fn write_ne_slice(self, out: &mut [u8]) {
        self.to_bits().write_ne_slice(out)
    }

    #[inline]
    fn swap_bytes(self) -> Self {
        Half::from_bits(self.to_bits().swap_bytes())
    }
}

/// Decode one `T` from the start of `bytes`.
///
/// Extra trailing bytes are ignored; fewer than `T::SIZE` is an error.
#[inline]
pub fn decode<T: Primitive>(bytes: &[u8], order: ByteOrder) -> Result<T> {
    let window = bytes.get(..T::SIZE).ok_or(Error::BufferTooSmall {
        required: T::SIZE,
        actual: bytes.len(),
    })?;
    Ok(T::from_ne_slice(window).to_order(order))
}

/// Encode `value` into the start of `out`.
#[inline]
pub fn encode<T: Primitive>(value: T, out: &mut [u8], order: ByteOrder) -> Result<()> {
    let actual = out.len();
    let window = out.get_mut(..T::SIZE).ok_or(Error::BufferTooSmall {
        required: T::SIZE,
        actual,
    })?;
    value.to_order(order).write_ne_slice(window);
    Ok(())
}

/// Decode a half-precision value straight to `f32`.
#[inline]
pub fn decode_half(bytes: &[u8], order: ByteOrder) -> Result<f32> {
    decode::<Half>(bytes, order).map(Half::to_f32)
}

/// Round `value` to half precision and encode it.
#[inline]
pub fn encode_half(value: f32, out: &mut [u8], order: ByteOrder) -> Result<()> {
    encode(Half::from_f32(value), out, order)
}

/// Read one `T` from the current position of `r`.
pub fn read_value<T: Primitive, R: Read + ?Sized>(r: &mut R, order: ByteOrder) -> Result<T> {
    let mut buf = [0u8; 8];
    let window = &mut buf[..T::SIZE];
    r.read_exact(window)?;
    decode(window, order)
}

/// Read one `T` at absolute `offset`, leaving the stream position unchanged.
pub fn read_value_at<T: Primitive, R: Read + Seek + ?Sized>(
    r: &mut R,
    offset: u64,
    order: ByteOrder,
) -> Result<T> {
    let mut buf = [0u8; 8];
    let window = &mut buf[..T::SIZE];
    read_at(r, offset, window, ReadMode::Strict)?;
    decode(window, order)
}

/// Read one `T` if the stream still holds a whole element.
///
/// Returns [`None`] on a clean or partial end of stream.
pub(crate) fn try_read_value<T: Primitive, R: Read + ?Sized>(
    r: &mut R,
    order: ByteOrder,
) -> Result<Option<T>> {
    let mut buf = [0u8; 8];
    let window = &mut buf[..T::SIZE];
    if read_full(r, window)? < T::SIZE {
        return Ok(None);
    }
    decode(window, order).map(Some)
}

/// Write one `T` at the current position of `w`.
pub fn write_value<T: Primitive, W: Write + ?Sized>(
    w: &mut W,
    value: T,
    order: ByteOrder,
) -> Result<()> {
    let mut buf = [0u8; 8];
    let window = &mut buf[..T::SIZE];
    encode(value, window, order)?;
    w.write_all(window)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn cross_order() {
        let mut buf = [0u8; 2];
        encode(0x1234u16, &mut buf, ByteOrder::Little).unwrap();
        assert_eq!(buf, [0x34, 0x12]);
        assert_eq!(decode::<u16>(&buf, ByteOrder::Big).unwrap(), 0x3412);
    }

    #[test]
    fn explicit_layouts() {
        let mut buf = [0u8; 4];
        encode(0x0102_0304u32, &mut buf, ByteOrder::Big).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        encode(-2i32, &mut buf, ByteOrder::Little).unwrap();
        assert_eq!(buf, [0xFE, 0xFF, 0xFF, 0xFF]);
        encode(1.0f32, &mut buf, ByteOrder::Big).unwrap();
        assert_eq!(buf, [0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn extremes_round_trip() {
        fn check<T: Primitive>(values: &[T]) {
            let mut buf = [0u8; 8];
            for &v in values {
                for order in [ByteOrder::Little, ByteOrder::Big] {
                    encode(v, &mut buf, order).unwrap();
                    assert_eq!(decode::<T>(&buf, order).unwrap(), v);
                }
            }
        }
        check(&[0u8, u8::MAX]);
        check(&[0i8, i8::MIN, i8::MAX]);
        check(&[0u16, u16::MAX]);
        check(&[0i16, i16::MIN, i16::MAX]);
        check(&[0u32, u32::MAX]);
        check(&[0i32, i32::MIN, i32::MAX]);
        check(&[0u64, u64::MAX]);
        check(&[0i64, i64::MIN, i64::MAX]);
        check(&[0.0f32, f32::MIN, f32::MAX, f32::INFINITY]);
        check(&[0.0f64, f64::MIN, f64::MAX, f64::NEG_INFINITY]);
    }

    #[test]
    fn single_byte_never_swaps() {
        assert_eq!(decode::<u8>(&[0xAB], ByteOrder::Big).unwrap(), 0xAB);
        assert_eq!(decode::<i8>(&[0x80], ByteOrder::Little).unwrap(), i8::MIN);
    }

    #[test]
    fn short_buffers_are_rejected() {
        assert!(matches!(
            decode::<u32>(&[1, 2, 3], ByteOrder::Little),
            Err(Error::BufferTooSmall {
                required: 4,
                actual: 3
            })
        ));
        let mut out = [0u8; 7];
        assert!(encode(1u64, &mut out, ByteOrder::Big).is_err());
    }

    #[test]
    fn half_helpers() {
        let mut buf = [0u8; 2];
        encode_half(1.5, &mut buf, ByteOrder::Big).unwrap();
        assert_eq!(buf, [0x3E, 0x00]);
        assert_eq!(decode_half(&buf, ByteOrder::Big).unwrap(), 1.5);
        encode_half(0.0, &mut buf, ByteOrder::Little).unwrap();
        assert_eq!(decode_half(&buf, ByteOrder::Little).unwrap(), 0.0);
    }

    #[test]
    fn stream_values() {
        let mut c = Cursor::new(Vec::new());
        write_value(&mut c, 0xDEADu16, ByteOrder::Big).unwrap();
        write_value(&mut c, 7u32, ByteOrder::Little).unwrap();
        assert_eq!(c.get_ref(), &[0xDE, 0xAD, 7, 0, 0, 0]);

        c.set_position(0);
        assert_eq!(read_value::<u16, _>(&mut c, ByteOrder::Big).unwrap(), 0xDEAD);
        assert_eq!(read_value_at::<u32, _>(&mut c, 2, ByteOrder::Little).unwrap(), 7);
        assert_eq!(c.position(), 2);

        c.set_position(5);
        assert_eq!(try_read_value::<u16, _>(&mut c, ByteOrder::Big).unwrap(), None);
    }
}
