//! Typed array views and table scanning.
//!
//! Format parsers rarely want a whole index table decoded up front. The
//! types here reinterpret bytes as fixed-width elements on demand and walk
//! sparse tables in place.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`typed`]    | [`TypedView`]: bounds-checked element access over a byte slice |
//! | [`skip`]     | `skip_while` / `skip_until` / `skip_until_nonzero` over buffers or streams |
//! | [`segments`] | [`OffsetSegment`] derivation from end-terminated index arrays |
//!
//! ## Example
//!
//! ```
//! use binkit::codec::ByteOrder;
//! use binkit::view::{Bound, SliceSource, skip_until_nonzero};
//!
//! // u32 LE table at offset 4 with zero padding rows.
//! let bytes = [0xFFu8, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0x2A, 0, 0, 0];
//! let mut src = SliceSource::new(&bytes);
//! let mut index = 0;
//! let row =
//!     skip_until_nonzero::<u32, _>(&mut src, 4, &mut index, Bound::Count(3), ByteOrder::Little)?;
//! assert_eq!((row, index), (Some(42), 2));
//! # Ok::<(), binkit::Error>(())
//! ```

pub mod segments;
pub mod skip;
pub mod typed;

pub use segments::{OffsetSegment, read_end_terminated, segments_from_end_terminated};
pub use skip::{
    Bound, ElementSource, SliceSource, StreamSource, skip_until, skip_until_nonzero, skip_while,
};
pub use typed::TypedView;
