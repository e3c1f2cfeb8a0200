//! **binkit** - bulk byte transforms and binary scanning for format parsers.
//!
//! # Modules
//! | Module | Purpose |
//! |--------|---------|
//! | [`transform`] | XOR / AND / OR over buffers, SIMD-dispatched |
//! | [`codec`]     | Endian-aware primitives, IEEE half floats, arrays |
//! | [`view`]      | Typed views, table skip scans, index segments |
//! | [`search`]    | Streaming pattern matcher |
//! | [`config`]    | Strategy and window tunables |
//! | [`utils`]     | Stream read helpers and position guards |

pub mod codec;
pub mod config;
pub mod error;
pub mod search;
pub mod transform;
pub mod utils;
pub mod view;

pub use error::{Error, Result};
