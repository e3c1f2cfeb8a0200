//! Vector kernels for the aligned body of a constant-value transform.
//!
//! This is the only module in the crate that contains `unsafe`. The single
//! entry point, [`apply_body`], is safe: it checks alignment, length and CPU
//! support before dispatching to a `#[target_feature]` kernel, so aligned
//! loads and stores can never touch misaligned or out-of-bounds memory.

use super::bitwise::{BitOp, apply_scalar};
use super::dispatch::Strategy;

/// Apply `op` with a broadcast `value` to every byte of `body`.
///
/// # Panics
/// Panics if `body` does not start on a `strategy.width()` boundary, if its
/// length is not a multiple of the width, or if the CPU lacks `strategy`.
pub(crate) fn apply_body(strategy: Strategy, body: &mut [u8], value: u8, op: BitOp) {
    let width = strategy.width();
    assert!(
        body.as_ptr() as usize % width == 0 && body.len() % width == 0,
        "vector body must be {width}-byte aligned and a whole number of vectors"
    );
    assert!(strategy.is_supported(), "{strategy} is not supported");

    match strategy {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: SSE2 support, alignment and length were asserted above.
        Strategy::Sse2 => unsafe { x86::apply_sse2(body, value, op) },
        #[cfg(target_arch = "x86_64")]
        // SAFETY: AVX2 support, alignment and length were asserted above.
        Strategy::Avx2 => unsafe { x86::apply_avx2(body, value, op) },
        #[cfg(target_arch = "aarch64")]
        // SAFETY: NEON support and length were asserted above.
        Strategy::Neon => unsafe { neon::apply_neon(body, value, op) },
        _ => apply_scalar(body, value, op),
    }
}

/// Walk `$body` in `$width`-byte blocks: load, combine with `$pattern`,
/// store back in place.
#[allow(unused_macros)]
macro_rules! stride {
    (
        $body:expr, $width:expr, $vec:ty, $pattern:expr,
        $load:ident, $op:ident, $store:ident $(,)?
    ) => {
        for block in $body.chunks_exact_mut($width) {
            let ptr = block.as_mut_ptr().cast::<$vec>();
            $store(ptr, $op($load(ptr), $pattern));
        }
    };
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::*;

    use super::BitOp;

    /// # Safety
    /// The CPU must support SSE2; `body` must be 16-byte aligned with a
    /// length that is a multiple of 16.
    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn apply_sse2(body: &mut [u8], value: u8, op: BitOp) {
        unsafe {
            let pattern = _mm_set1_epi8(value as i8);
            match op {
                BitOp::Xor => stride!(
                    body,
                    16,
                    __m128i,
                    pattern,
                    _mm_load_si128,
                    _mm_xor_si128,
                    _mm_store_si128,
                ),
                BitOp::And => stride!(
                    body,
                    16,
                    __m128i,
                    pattern,
                    _mm_load_si128,
                    _mm_and_si128,
                    _mm_store_si128,
                ),
                BitOp::Or => stride!(
                    body,
                    16,
                    __m128i,
                    pattern,
                    _mm_load_si128,
                    _mm_or_si128,
                    _mm_store_si128,
                ),
            }
        }
    }

    /// # Safety
    /// The CPU must support AVX2; `body` must be 32-byte aligned with a
    /// length that is a multiple of 32.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn apply_avx2(body: &mut [u8], value: u8, op: BitOp) {
        unsafe {
            let pattern = _mm256_set1_epi8(value as i8);
            match op {
                BitOp::Xor => stride!(
                    body,
                    32,
                    __m256i,
                    pattern,
                    _mm256_load_si256,
                    _mm256_xor_si256,
                    _mm256_store_si256,
                ),
                BitOp::And => stride!(
                    body,
                    32,
                    __m256i,
                    pattern,
                    _mm256_load_si256,
                    _mm256_and_si256,
                    _mm256_store_si256,
                ),
                BitOp::Or => stride!(
                    body,
                    32,
                    __m256i,
                    pattern,
                    _mm256_load_si256,
                    _mm256_or_si256,
                    _mm256_store_si256,
                ),
            }
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use std::arch::aarch64::*;

    use super::BitOp;

    /// # Safety
    /// The CPU must support NEON; `body` length must be a multiple of 16.
    #[target_feature(enable = "neon")]
    pub(super) unsafe fn apply_neon(body: &mut [u8], value: u8, op: BitOp) {
        unsafe {
            let pattern = vdupq_n_u8(value);
            match op {
                BitOp::Xor => stride!(body, 16, u8, pattern, vld1q_u8, veorq_u8, vst1q_u8),
                BitOp::And => stride!(body, 16, u8, pattern, vld1q_u8, vandq_u8, vst1q_u8),
                BitOp::Or => stride!(body, 16, u8, pattern, vld1q_u8, vorrq_u8, vst1q_u8),
            }
        }
    }
}
