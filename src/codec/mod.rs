//! Endian-aware primitive codec.
//!
//! Converts raw byte layouts to and from fixed-width numbers under a chosen
//! [`ByteOrder`]. Decoding reinterprets the byte window in host order and
//! swaps only when the requested order differs from the host; single-byte
//! types never swap.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`order`]     | [`ByteOrder`], raw tags and byte-order marks |
//! | [`primitive`] | [`Primitive`]/[`Integer`] traits, scalar `decode`/`encode`, stream reads |
//! | [`half`]      | Hand-rolled binary16 ↔ binary32 conversion |
//! | [`array`]     | `decode_array`, `encode_array`, in-place `convert_array` |
//!
//! ## Supported element types
//!
//! | Width | Types |
//! |-------|-------|
//! | 1 | `u8`, `i8` |
//! | 2 | `u16`, `i16`, [`Half`] |
//! | 4 | `u32`, `i32`, `f32` |
//! | 8 | `u64`, `i64`, `f64` |

pub mod array;
pub mod half;
pub mod order;
pub mod primitive;

pub use array::{convert_array, decode_array, encode_array};
pub use half::Half;
pub use order::ByteOrder;
pub use primitive::{
    Integer, Primitive, decode, decode_half, encode, encode_half, read_value, read_value_at,
    write_value,
};
