//! In-place bitwise transforms over byte buffers.
//!
//! ## Constant-value form
//! The buffer is split into three zones relative to the selected vector
//! width `W`:
//!
//! ```text
//! [ prefix: until base address % W == 0 ][ body: n × W bytes ][ suffix: < W ]
//!   byte at a time                         aligned vector ops    byte at a time
//! ```
//!
//! The result is bit-identical to [`apply_scalar`] over the whole buffer
//! for every strategy; strategies differ only in speed.
//!
//! ## Key-sequence form
//! Buffer and key are not co-aligned, so no partitioning happens. Under
//! [`SequencePolicy::Truncate`] the first `min(buf.len(), key.len())` bytes
//! are touched; under [`SequencePolicy::Repeat`] byte `i` is combined with
//! `key[i % key.len()]` for the whole buffer.

use super::dispatch::{Strategy, strategy};
use super::simd;
use crate::{Error, Result};

/// Bitwise operation applied byte by byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOp {
    Xor,
    And,
    Or,
}

impl BitOp {
    #[inline]
    pub const fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            BitOp::Xor => a ^ b,
            BitOp::And => a & b,
            BitOp::Or => a | b,
        }
    }
}

/// How a key shorter than the buffer is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SequencePolicy {
    /// Stop at the shorter of buffer and key.
    #[default]
    Truncate,
    /// Wrap the key cyclically over the whole buffer.
    Repeat,
}

/// XOR every byte of `buf` with `value`.
#[inline]
pub fn apply_xor(buf: &mut [u8], value: u8) {
    apply_with(strategy(), buf, value, BitOp::Xor);
}

/// AND every byte of `buf` with `value`.
#[inline]
pub fn apply_and(buf: &mut [u8], value: u8) {
    apply_with(strategy(), buf, value, BitOp::And);
}

/// OR every byte of `buf` with `value`.
#[inline]
pub fn apply_or(buf: &mut [u8], value: u8) {
    apply_with(strategy(), buf, value, BitOp::Or);
}

/// Apply `op value` to `buf` using an explicit `strategy`.
///
/// Returns [`Error::UnsupportedStrategy`] if the CPU cannot run it; query
/// [`Strategy::is_supported`] or [`Strategy::available`] first.
pub fn apply_const(buf: &mut [u8], value: u8, op: BitOp, strategy: Strategy) -> Result<()> {
    if !strategy.is_supported() {
        return Err(Error::UnsupportedStrategy(strategy));
    }
    apply_with(strategy, buf, value, op);
    Ok(())
}

/// Byte-at-a-time reference implementation of the constant-value form.
#[inline]
pub fn apply_scalar(buf: &mut [u8], value: u8, op: BitOp) {
    for b in buf.iter_mut() {
        *b = op.apply(*b, value);
    }
}

fn apply_with(strategy: Strategy, buf: &mut [u8], value: u8, op: BitOp) {
    let width = strategy.width();
    if width == 1 || buf.len() < width {
        apply_scalar(buf, value, op);
        return;
    }
    let (prefix, body, suffix) = split_aligned(buf, width);
    apply_scalar(prefix, value, op);
    simd::apply_body(strategy, body, value, op);
    apply_scalar(suffix, value, op);
}

/// Split `buf` into an unaligned prefix, a `width`-aligned body made of
/// whole vectors, and the remaining suffix.
pub(crate) fn split_aligned(buf: &mut [u8], width: usize) -> (&mut [u8], &mut [u8], &mut [u8]) {
    let len = buf.len();
    let head = buf.as_ptr().align_offset(width).min(len);
    let body_len = (len - head) / width * width;
    let (prefix, rest) = buf.split_at_mut(head);
    let (body, suffix) = rest.split_at_mut(body_len);
    (prefix, body, suffix)
}

/// Combine `buf` with `key` under `policy`.
///
/// An empty buffer or key leaves `buf` untouched.
pub fn apply_key(buf: &mut [u8], key: &[u8], policy: SequencePolicy, op: BitOp) {
    if key.is_empty() {
        return;
    }
    match policy {
        SequencePolicy::Truncate => {
            for (b, &k) in buf.iter_mut().zip(key) {
                *b = op.apply(*b, k);
            }
        }
        SequencePolicy::Repeat => {
            for (b, &k) in buf.iter_mut().zip(key.iter().cycle()) {
                *b = op.apply(*b, k);
            }
        }
    }
}

#[inline]
pub fn apply_xor_key(buf: &mut [u8], key: &[u8], policy: SequencePolicy) {
    apply_key(buf, key, policy, BitOp::Xor);
}

#[inline]
pub fn apply_and_key(buf: &mut [u8], key: &[u8], policy: SequencePolicy) {
    apply_key(buf, key, policy, BitOp::And);
}

#[inline]
pub fn apply_or_key(buf: &mut [u8], key: &[u8], policy: SequencePolicy) {
    apply_key(buf, key, policy, BitOp::Or);
}

/// Replace each byte with `f(byte, index)`.
///
/// Not vectorized; meant for index-dependent schemes that the fixed
/// operations cannot express.
pub fn apply_transform<F: FnMut(u8, usize) -> u8>(buf: &mut [u8], mut f: F) {
    for (i, b) in buf.iter_mut().enumerate() {
        *b = f(*b, i);
    }
}

/// XOR each byte with `(0xE6 & index) ^ salt`.
///
/// The index mask is applied to the low byte of the position, so the key
/// repeats every 256 bytes. The operation is its own inverse.
pub fn xor_index_salt(buf: &mut [u8], salt: u8) {
    apply_transform(buf, |b, i| b ^ ((0xE6 & i as u8) ^ salt));
}
