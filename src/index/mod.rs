//! The learned index: key model, segments, the segmentation algorithm and
//! the recursive multi-level structure built from it.

pub mod key;
pub(crate) mod model;
pub mod pgm;
pub mod segment;

pub use key::Key;
pub use pgm::{PgmIndex, EPSILON_RECURSIVE, MIN_EPSILON};
pub use segment::Segment;
