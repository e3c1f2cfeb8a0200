//! Byte order selection.

use crate::{Error, Result};

/// Byte order of a multi-byte value in its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl ByteOrder {
    /// Byte order of the host CPU.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = ByteOrder::Little;
    /// Byte order of the host CPU.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = ByteOrder::Big;

    /// Whether values in this order must be byte-reversed to match the host.
    #[inline]
    pub const fn needs_swap(self) -> bool {
        !matches!(
            (self, Self::NATIVE),
            (ByteOrder::Little, ByteOrder::Little) | (ByteOrder::Big, ByteOrder::Big)
        )
    }

    /// Whether this is the host byte order.
    #[inline]
    pub const fn is_native(self) -> bool {
        !self.needs_swap()
    }

    /// Decode a raw tag as stored in headers: `0` = little, `1` = big.
    pub fn from_raw(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(ByteOrder::Little),
            1 => Ok(ByteOrder::Big),
            other => Err(Error::InvalidByteOrder(other)),
        }
    }

    /// Inverse of [`ByteOrder::from_raw`].
    pub const fn to_raw(self) -> u8 {
        match self {
            ByteOrder::Little => 0,
            ByteOrder::Big => 1,
        }
    }

    /// Interpret a byte-order mark read in little-endian order.
    ///
    /// Little-endian files store the bytes `FE FF` (read here as `0xFFFE`),
    /// big-endian files store `FF FE`.
    pub fn from_bom(bom: u16) -> Result<Self> {
        match bom {
            0xFFFE => Ok(ByteOrder::Little),
            0xFEFF => Ok(ByteOrder::Big),
            _ => Err(Error::InvalidArgument("unrecognised byte order mark")),
        }
    }
}
