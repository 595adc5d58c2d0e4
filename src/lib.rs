//! Sorted map stored as two parallel contiguous buffers.
//!
//! `FlatMap` keeps its keys in one sorted buffer and its values in another, with the value
//! for `keys()[i]` at `values()[i]`. Lookups are a boundary search over the key buffer
//! (linear for short maps, binary for long ones), iteration is a straight walk over both
//! buffers, and insert/erase shift the tail of both buffers by one slot.
//!
//! Enable the `log` feature to get `trace` records whenever the buffers are reallocated.

mod consts;
pub use consts::LINEAR_SEARCH_THRESHOLD;

mod compare;
pub use compare::*;

mod error;
pub use error::Error;

pub mod key_search;
pub use key_search::{Adaptive, BinarySearch, ChunkedLinearSearch, KeySearch, LinearSearch};

mod raw;
mod utils;

mod map;
pub use map::*;

mod cursor;
pub use cursor::*;

mod iterator;
pub use iterator::*;
