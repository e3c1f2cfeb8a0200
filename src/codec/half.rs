//! IEEE 754 binary16 ("half") conversion without a native `f16` type.
//!
//! ## Layout
//! ```text
//! bit 15      sign
//! bits 14-10  exponent (bias 15)
//! bits 9-0    mantissa
//! ```
//!
//! | Exponent | Mantissa | Class |
//! |----------|----------|-------|
//! | 0        | 0        | ±0 |
//! | 0        | ≠ 0      | subnormal: `m × 2^-24` |
//! | 1..=30   | any      | normal: `1.m × 2^(e-15)` |
//! | 31       | 0        | ±∞ |
//! | 31       | ≠ 0      | NaN |
//!
//! Every 16-bit pattern is a valid half, so decoding never fails.

use std::fmt;

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x7C00;
const MAN_MASK: u16 = 0x03FF;

/// A binary16 value stored as its raw bit pattern.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Half(u16);

impl Half {
    pub const ZERO: Half = Half(0);
    pub const ONE: Half = Half(0x3C00);
    pub const INFINITY: Half = Half(0x7C00);
    pub const NEG_INFINITY: Half = Half(0xFC00);
    pub const NAN: Half = Half(0x7E00);
    /// Largest finite value, 65504.
    pub const MAX: Half = Half(0x7BFF);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Half(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Round `value` to the nearest half, ties to even.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Half(f32_to_half_bits(value))
    }

    /// Exact widening conversion.
    #[inline]
    pub fn to_f32(self) -> f32 {
        half_bits_to_f32(self.0)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }

    pub const fn is_nan(self) -> bool {
        self.0 & EXP_MASK == EXP_MASK && self.0 & MAN_MASK != 0
    }

    pub const fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXP_MASK
    }

    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Half({:?} = {:#06x})", self.to_f32(), self.0)
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl From<Half> for f32 {
    fn from(h: Half) -> f32 {
        h.to_f32()
    }
}

/// Widen a binary16 bit pattern to `f32`.
pub fn half_bits_to_f32(bits: u16) -> f32 {
    let sign = u32::from(bits & SIGN_MASK) << 16;
    let exp = u32::from((bits & EXP_MASK) >> 10);
    let man = u32::from(bits & MAN_MASK);

    let out = match (exp, man) {
        (0, 0) => sign,
        (0, _) => {
            // Subnormal: shift until the implicit leading bit appears, then
            // re-express as a binary32 normal.
            let mut e: i32 = 1;
            let mut m = man;
            while m & 0x0400 == 0 {
                m <<= 1;
                e -= 1;
            }
            let exp32 = (e + 127 - 15) as u32;
            sign | (exp32 << 23) | ((m & 0x03FF) << 13)
        }
        // Infinity keeps a zero mantissa, NaN keeps its payload.
        (0x1F, _) => sign | 0x7F80_0000 | (man << 13),
        _ => sign | ((exp + 127 - 15) << 23) | (man << 13),
    };
    f32::from_bits(out)
}

/// Narrow an `f32` to a binary16 bit pattern, rounding to nearest even.
pub fn f32_to_half_bits(value: f32) -> u16 {
    let x = value.to_bits();
    let sign = (x & 0x8000_0000) >> 16;
    let exp = ((x & 0x7F80_0000) >> 23) as i32;
    let man = x & 0x007F_FFFF;

    if exp == 0xFF {
        if man == 0 {
            return (sign | 0x7C00) as u16;
        }
        // Keep the top payload bits and force quiet so the value stays NaN.
        return (sign | 0x7C00 | 0x0200 | (man >> 13)) as u16;
    }

    let half_exp = exp - 127 + 15;
    if half_exp >= 0x1F {
        return (sign | 0x7C00) as u16;
    }

    if half_exp <= 0 {
        // Below 2^-25 even the smallest subnormal rounds to zero.
        if 14 - half_exp > 24 {
            return sign as u16;
        }
        let man = man | 0x0080_0000;
        let shift = (14 - half_exp) as u32;
        let mut half_man = man >> shift;
        let round_bit = 1u32 << (shift - 1);
        if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
            half_man += 1;
        }
        return (sign | half_man) as u16;
    }

    let bits = sign | ((half_exp as u32) << 10) | (man >> 13);
    let round_bit = 0x0000_1000;
    // A mantissa carry rolls into the exponent, which is the correct result
    // (up to and including infinity).
    if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
        (bits + 1) as u16
    } else {
        bits as u16
    }
}
