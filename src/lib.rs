//! # pgm-sorted
//!
//! An immutable sorted multiset of numeric keys indexed by a Piecewise
//! Geometric Model (PGM): a hierarchy of linear regression segments that
//! locates any key to a window of at most `2 * epsilon + 1` positions of
//! the sorted array, where a final binary search completes the lookup.
//! Compared to a comparison tree of the same data, the model is one to two
//! orders of magnitude smaller and considerably friendlier to caches.
//!
//! ## Quick start
//!
//! ```rust
//! use pgm_sorted::SortedContainer;
//!
//! let c = SortedContainer::from_values([9u64, 3, 7, 1, 5, 5], false, 16).unwrap();
//! assert_eq!(c.as_slice(), &[1, 3, 5, 5, 7, 9]);
//! assert!(c.contains(5));
//! assert_eq!(c.count(5), 2);
//! assert_eq!(c.find_gt(5), Some(7));
//!
//! let other = SortedContainer::from_values([5u64, 6], false, 16).unwrap();
//! assert_eq!(c.union(&other).as_slice(), &[1, 3, 5, 6, 7, 9]);
//! ```
//!
//! ## Shape of the crate
//!
//! - [`SortedContainer`]: the container. Owns one sorted key array and one
//!   flat segment array; sealed after construction, so queries are safe
//!   from any number of threads. Supports membership, predecessor and
//!   successor, rank, count, range and positional queries, plus merge,
//!   union, intersection, difference, symmetric difference, subset and
//!   superset tests over two containers or a container and a key stream.
//! - [`PgmIndex`]: the learned index on its own, for callers that keep
//!   keys elsewhere.
//! - [`Key`]: implemented for `i32`, `u32`, `i64`, `u64`, `f32` and `f64`
//!   (floats must not be NaN).
//!
//! Mutation is out of scope by design: derived containers (set operations,
//! slices, [`SortedContainer::drop_duplicates`]) are freshly built and
//! never alias their inputs.
//!
//! ## Epsilon
//!
//! `epsilon` trades model size for window width and must be at least
//! [`MIN_EPSILON`]. The inner levels always use the fixed
//! [`EPSILON_RECURSIVE`] bound, keeping each per-level refinement inside a
//! handful of cache lines.
//!
//! ## Features
//!
//! - `serde`: serialization for the container and index types.

pub mod collections;
pub mod coop;
pub mod error;
pub mod index;
pub mod util;

pub use collections::container::{SortedContainer, DEFAULT_EPSILON};
pub use error::Error;
pub use index::key::Key;
pub use index::pgm::{PgmIndex, EPSILON_RECURSIVE, MIN_EPSILON};
pub use index::segment::Segment;
pub use util::approx_pos::ApproxPos;
