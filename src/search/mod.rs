//! Byte-pattern search.
//!
//! | Item | Source |
//! |------|--------|
//! | [`Matches`] / [`matches`]   | any `Read + Seek` stream, bounded window |
//! | [`SliceMatches`] / [`matches_in`] | contiguous memory, zero-copy |
//!
//! Both report every start offset in `[offset_lo, offset_hi)` in ascending
//! order, overlapping matches included.
//!
//! ```
//! use std::io::Cursor;
//! use binkit::search::matches;
//!
//! let mut file = Cursor::new(b"SARC..SARC".to_vec());
//! let found: Vec<u64> = matches(&mut file, 0, 10, b"SARC", 4)?.collect::<Result<_, _>>()?;
//! assert_eq!(found, [0, 6]);
//! # Ok::<(), binkit::Error>(())
//! ```

pub mod matcher;

pub use matcher::{
    Matches, SliceMatches, first_match, last_match, matches, matches_in, matches_with_config,
};
