//! Bulk bitwise transforms (XOR / AND / OR and per-byte functions).
//!
//! Asset formats routinely obfuscate data with a single-byte XOR, a short
//! repeating key, or an index-derived key. The functions here apply those
//! schemes in place; the buffer length never changes.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bitwise`]  | Public API: constant, key-sequence and generic transforms |
//! | [`dispatch`] | [`Strategy`] enum, runtime ISA detection, process-wide selection |
//! | `simd`       | Aligned SSE2 / AVX2 / NEON kernels behind a safe entry point |
//!
//! ## Choosing the right function
//!
//! * **One byte for the whole buffer** - [`apply_xor`], [`apply_and`],
//!   [`apply_or`]. These use the process-wide [`strategy()`]; use
//!   [`apply_const`] to pin a specific one.
//! * **A key** - [`apply_xor_key`] and friends with a [`SequencePolicy`].
//! * **Anything else** - [`apply_transform`] with a closure over
//!   `(byte, index)`.

pub mod bitwise;
pub mod dispatch;
mod simd;

pub use bitwise::{
    BitOp, SequencePolicy, apply_and, apply_and_key, apply_const, apply_key, apply_or,
    apply_or_key, apply_scalar, apply_transform, apply_xor, apply_xor_key, xor_index_salt,
};
pub use dispatch::{Strategy, strategy};
