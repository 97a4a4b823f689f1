//! Multi-level recursive PGM index.
//!
//! The leaf level segments the key array with the user's epsilon; each
//! upper level segments the origin keys of the level below with the fixed
//! recursive epsilon, until a single root segment remains. All levels live
//! in one flat segment array, leaves first, each level terminated by a
//! sentinel whose intercept is the size of the level below. A query walks
//! from the root down to a leaf segment and returns a position window of
//! width at most `2 * epsilon + 1` around the predicted rank.

use core::cmp::Ordering;

use crate::error::Error;
use crate::index::key::{key_max, Key};
use crate::index::model::build_segments;
use crate::index::segment::Segment;
use crate::util::approx_pos::ApproxPos;
use crate::util::search::{pgm_add_eps, pgm_sub_eps};

/// Smallest epsilon accepted by the container constructors.
pub const MIN_EPSILON: usize = 16;

/// Error bound used for every level above the leaves. Small enough that
/// the per-level refinement scans at most `2 * EPSILON_RECURSIVE + 1`
/// cache-resident segments.
pub const EPSILON_RECURSIVE: usize = 4;

pub(crate) fn check_epsilon(epsilon: usize) -> Result<(), Error> {
    if epsilon < MIN_EPSILON {
        return Err(Error::EpsilonTooSmall { epsilon });
    }
    Ok(())
}

/// Learned index over a sorted key array.
///
/// The index stores only the model, not the keys. It is sealed after
/// construction; queries take `&self` and are safe from any number of
/// threads.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PgmIndex<K: Key> {
    epsilon: usize,
    n: usize,
    first_key: K,
    segments: Vec<Segment<K>>,
    levels_sizes: Vec<usize>,
    levels_offsets: Vec<usize>,
}

impl<K: Key> PgmIndex<K> {
    /// Build an index over `keys`, which must be sorted non-decreasing.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EpsilonTooSmall`] when `epsilon < MIN_EPSILON`.
    pub fn new(keys: &[K], epsilon: usize) -> Result<Self, Error> {
        check_epsilon(epsilon)?;
        Ok(Self::build(keys, epsilon))
    }

    pub(crate) fn build(keys: &[K], epsilon: usize) -> Self {
        debug_assert!(
            keys.windows(2)
                .all(|w| w[0].key_cmp(&w[1]) != Ordering::Greater),
            "keys must be sorted"
        );

        let n = keys.len();
        if n == 0 {
            return Self {
                epsilon,
                n: 0,
                first_key: K::zero(),
                segments: Vec::new(),
                levels_sizes: Vec::new(),
                levels_offsets: Vec::new(),
            };
        }

        let mut segments = Vec::new();
        let mut levels_sizes = Vec::new();
        let mut levels_offsets = Vec::new();

        let mut level = build_segments(keys, epsilon);
        let mut below = n;
        loop {
            let size = level.len();
            levels_offsets.push(segments.len());
            levels_sizes.push(size);
            segments.append(&mut level);
            segments.push(Segment::sentinel(below));
            if size <= 1 {
                break;
            }
            let origins: Vec<K> = segments[segments.len() - 1 - size..segments.len() - 1]
                .iter()
                .map(|s| s.key)
                .collect();
            level = build_segments(&origins, EPSILON_RECURSIVE);
            debug_assert!(level.len() < size);
            below = size;
        }

        log::debug!(
            "built index over {n} keys: {} leaf segments, height {}",
            levels_sizes[0],
            levels_sizes.len()
        );

        Self {
            epsilon,
            n,
            first_key: keys[0],
            segments,
            levels_sizes,
            levels_offsets,
        }
    }

    /// Locate `key` to a window of the underlying array.
    ///
    /// The returned window always brackets the leftmost insertion point of
    /// `key`; for a key present in the array this is the rank of its first
    /// occurrence.
    pub fn approximate(&self, key: K) -> ApproxPos {
        if self.n == 0 {
            return ApproxPos::new(0, 0, 0);
        }

        let k = key_max(self.first_key, key);
        let height = self.levels_sizes.len();
        let mut idx = self.levels_offsets[height - 1];

        for level in (0..height.saturating_sub(1)).rev() {
            let pred = self.segments[idx].predict(k);
            let pos = pred.min(self.segments[idx + 1].intercept as usize);

            let offset = self.levels_offsets[level];
            let size = self.levels_sizes[level];
            let mut i = offset + pgm_sub_eps(pos, EPSILON_RECURSIVE + 1).min(size - 1);
            while i + 1 < offset + size
                && self.segments[i + 1].key.key_cmp(&k) != Ordering::Greater
            {
                i += 1;
            }
            idx = i;
        }

        let pred = self.segments[idx].predict(k);
        let pos = pred.min(self.segments[idx + 1].intercept as usize);
        ApproxPos::new(pos, pgm_sub_eps(pos, self.epsilon), pgm_add_eps(pos, self.epsilon, self.n))
    }

    /// Number of keys the index was built over.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn epsilon(&self) -> usize {
        self.epsilon
    }

    /// Number of levels, including the root.
    #[inline]
    pub fn height(&self) -> usize {
        self.levels_sizes.len()
    }

    /// Number of segments in the leaf level.
    #[inline]
    pub fn segments_count(&self) -> usize {
        self.levels_sizes.first().copied().unwrap_or(0)
    }

    /// Approximate memory footprint of the model in bytes.
    pub fn size_in_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.segments.capacity() * core::mem::size_of::<Segment<K>>()
            + (self.levels_sizes.capacity() + self.levels_offsets.capacity())
                * core::mem::size_of::<usize>()
    }
}
