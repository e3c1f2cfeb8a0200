//! Whole-array conversions.
//!
//! The swap decision is made once per call; the per-element loop is what
//! remains, since elements are at most eight bytes wide.

use super::order::ByteOrder;
use super::primitive::Primitive;
use crate::{Error, Result};

pub(crate) fn check_multiple<T: Primitive>(len: usize) -> Result<usize> {
    if len % T::SIZE != 0 {
        return Err(Error::InvalidArgument(
            "byte length is not a multiple of the element size",
        ));
    }
    Ok(len / T::SIZE)
}

/// Decode every element of `bytes`.
pub fn decode_array<T: Primitive>(bytes: &[u8], order: ByteOrder) -> Result<Vec<T>> {
    let count = check_multiple::<T>(bytes.len())?;
    let mut out = Vec::with_capacity(count);
    if order.needs_swap() {
        out.extend(
            bytes
                .chunks_exact(T::SIZE)
                .map(|c| T::from_ne_slice(c).swap_bytes()),
        );
    } else {
        out.extend(bytes.chunks_exact(T::SIZE).map(T::from_ne_slice));
    }
    Ok(out)
}

/// Encode `values` into the front of `out`.
///
/// Returns the number of bytes written.
pub fn encode_array<T: Primitive>(values: &[T], out: &mut [u8], order: ByteOrder) -> Result<usize> {
    let required = values.len() * T::SIZE;
    if out.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: out.len(),
        });
    }
    let swap = order.needs_swap();
    for (&v, chunk) in values.iter().zip(out.chunks_exact_mut(T::SIZE)) {
        let v = if swap { v.swap_bytes() } else { v };
        v.write_ne_slice(chunk);
    }
    Ok(required)
}

/// Convert an array of `T` between host order and `order` in place.
///
/// A no-op for host order and for single-byte elements.
pub fn convert_array<T: Primitive>(buf: &mut [u8], order: ByteOrder) -> Result<()> {
    check_multiple::<T>(buf.len())?;
    if T::SIZE == 1 || !order.needs_swap() {
        return Ok(());
    }
    for chunk in buf.chunks_exact_mut(T::SIZE) {
        chunk.reverse();
    }
    Ok(())
}
