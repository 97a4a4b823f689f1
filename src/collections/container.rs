//! Immutable sorted multiset backed by a learned index.

use core::fmt;
use core::ops::RangeBounds;

use num_traits::{NumCast, ToPrimitive};

use crate::collections::algebra;
use crate::coop;
use crate::error::Error;
use crate::index::key::Key;
use crate::index::pgm::{check_epsilon, PgmIndex};
use crate::util::approx_pos::ApproxPos;
use crate::util::range::range_to_indices;
use crate::util::search::{lower_bound_window, upper_bound_window};
use crate::util::slice;

/// Epsilon used by the convenience constructors.
pub const DEFAULT_EPSILON: usize = 64;

/// An immutable multiset of numeric keys held in one sorted array and
/// indexed by a [`PgmIndex`].
///
/// The container is sealed at construction: nothing is written to the key
/// array or the index afterwards, so shared references can be used from
/// any number of threads without synchronization. Every derived container
/// (set operations, slices, `drop_duplicates`) owns fresh buffers.
///
/// # Example
///
/// ```
/// use pgm_sorted::SortedContainer;
///
/// let c = SortedContainer::from_values((0..10_000u64).map(|i| i * 10), false, 64).unwrap();
/// assert!(c.contains(500));
/// assert_eq!(c.lower_bound(505), 51);
/// assert_eq!(c.rank(990), 100);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortedContainer<K: Key> {
    data: Vec<K>,
    index: PgmIndex<K>,
    duplicates: bool,
}

impl<K: Key> SortedContainer<K> {
    /// An empty container with the given epsilon.
    pub fn empty(epsilon: usize) -> Result<Self, Error> {
        check_epsilon(epsilon)?;
        Ok(Self::from_sorted_vec(Vec::new(), epsilon))
    }

    /// Build from an arbitrary key stream.
    ///
    /// In-order arrival is detected while collecting; unordered input is
    /// sorted. With `drop_duplicates` only the first copy of each equal
    /// run is kept.
    pub fn from_values<I>(values: I, drop_duplicates: bool, epsilon: usize) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
    {
        check_epsilon(epsilon)?;
        let mut data = algebra::collect_sorted(values);
        if drop_duplicates {
            data.dedup_by(|a, b| a == b);
        }
        Ok(Self::from_sorted_vec(data, epsilon))
    }

    /// Build from a stream of any primitive numeric type, converting each
    /// element to `K`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedInput`] when an element cannot be represented
    /// as `K` (out of range for the key type, or not a number).
    pub fn from_cast_values<T, I>(
        values: I,
        drop_duplicates: bool,
        epsilon: usize,
    ) -> Result<Self, Error>
    where
        T: ToPrimitive,
        I: IntoIterator<Item = T>,
    {
        check_epsilon(epsilon)?;
        let iter = values.into_iter();
        let mut raw: Vec<K> = Vec::with_capacity(iter.size_hint().0);
        for v in iter {
            raw.push(<K as NumCast>::from(v).ok_or(Error::UnsupportedInput)?);
        }
        Self::from_values(raw, drop_duplicates, epsilon)
    }

    /// Build from a typed contiguous key array.
    pub fn from_slice(values: &[K], drop_duplicates: bool, epsilon: usize) -> Result<Self, Error> {
        Self::from_values(values.iter().copied(), drop_duplicates, epsilon)
    }

    /// Rebuild from another container.
    ///
    /// When the epsilon matches and no deduplication is needed, the
    /// segments are cloned instead of rebuilt.
    pub fn from_container(src: &Self, drop_duplicates: bool, epsilon: usize) -> Result<Self, Error> {
        check_epsilon(epsilon)?;
        if drop_duplicates && src.duplicates {
            let mut data = src.data.clone();
            data.dedup_by(|a, b| a == b);
            return Ok(Self::from_sorted_vec(data, epsilon));
        }
        if src.epsilon() == epsilon {
            return Ok(Self {
                data: src.data.clone(),
                index: src.index.clone(),
                duplicates: src.duplicates,
            });
        }
        Ok(Self::from_sorted_vec(src.data.clone(), epsilon))
    }

    /// A new container keeping the first copy of each equal run.
    pub fn drop_duplicates(&self) -> Self {
        let mut data = self.data.clone();
        data.dedup_by(|a, b| a == b);
        Self::from_sorted_vec(data, self.epsilon())
    }

    /// Internal constructor taking ownership of an already sorted buffer.
    /// Epsilon must have been validated by the caller.
    pub(crate) fn from_sorted_vec(data: Vec<K>, epsilon: usize) -> Self {
        coop::yield_before_heavy_build(data.len());
        let index = PgmIndex::build(&data, epsilon);
        let duplicates = data.windows(2).any(|w| w[0] == w[1]);
        Self {
            data,
            index,
            duplicates,
        }
    }

    // Accessors

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn epsilon(&self) -> usize {
        self.index.epsilon()
    }

    /// True when some adjacent pair of the array is equal.
    #[inline]
    pub fn has_duplicates(&self) -> bool {
        self.duplicates
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.index.height()
    }

    #[inline]
    pub fn segments_count(&self) -> usize {
        self.index.segments_count()
    }

    /// Approximate memory footprint of the keys plus the index.
    pub fn size_in_bytes(&self) -> usize {
        self.data.capacity() * core::mem::size_of::<K>() + self.index.size_in_bytes()
    }

    #[inline]
    pub fn first(&self) -> Option<K> {
        self.data.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<K> {
        self.data.last().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[K] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<K> {
        self.data
    }

    /// Keys in ascending order. Reverse for descending order.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.data.iter().copied()
    }

    // Queries

    /// Position window for `x` from the learned index.
    #[inline]
    pub fn approximate(&self, x: K) -> ApproxPos {
        self.index.approximate(x)
    }

    /// True when an element equal to `x` is present.
    pub fn contains(&self, x: K) -> bool {
        let ap = self.index.approximate(x);
        let hi = ap.hi.min(self.data.len());
        self.data[ap.lo.min(hi)..hi]
            .binary_search_by(|k| k.key_cmp(&x))
            .is_ok()
    }

    /// Leftmost position whose element is `>= x`, in `[0, len]`.
    pub fn lower_bound(&self, x: K) -> usize {
        let ap = self.index.approximate(x);
        let hi = ap.hi.min(self.data.len());
        lower_bound_window(&self.data, x, ap.lo.min(hi), hi)
    }

    /// Leftmost position whose element is `> x`, in `[0, len]`.
    ///
    /// A run of elements equal to `x` may extend past the index window, so
    /// when the container holds duplicates the window result is pushed
    /// forward by exponential probing before a final bounded search.
    pub fn upper_bound(&self, x: K) -> usize {
        let ap = self.index.approximate(x);
        let n = self.data.len();
        let hi = ap.hi.min(n);
        let it = upper_bound_window(&self.data, x, ap.lo.min(hi), hi);
        if !self.duplicates {
            return it;
        }

        let mut step = 1usize;
        while it + step < n && self.data[it + step] == x {
            step *= 2;
        }
        upper_bound_window(&self.data, x, it + step / 2, (it + step).min(n))
    }

    /// Insertion point keeping equal elements to the right.
    #[inline]
    pub fn bisect_left(&self, x: K) -> usize {
        self.lower_bound(x)
    }

    /// Insertion point keeping equal elements to the left.
    #[inline]
    pub fn bisect_right(&self, x: K) -> usize {
        self.upper_bound(x)
    }

    /// Rightmost element `< x`.
    pub fn find_lt(&self, x: K) -> Option<K> {
        match self.lower_bound(x) {
            0 => None,
            i => Some(self.data[i - 1]),
        }
    }

    /// Rightmost element `<= x`.
    pub fn find_le(&self, x: K) -> Option<K> {
        match self.upper_bound(x) {
            0 => None,
            i => Some(self.data[i - 1]),
        }
    }

    /// Leftmost element `> x`.
    pub fn find_gt(&self, x: K) -> Option<K> {
        self.data.get(self.upper_bound(x)).copied()
    }

    /// Leftmost element `>= x`.
    pub fn find_ge(&self, x: K) -> Option<K> {
        self.data.get(self.lower_bound(x)).copied()
    }

    /// Number of elements `<= x`.
    #[inline]
    pub fn rank(&self, x: K) -> usize {
        self.upper_bound(x)
    }

    /// Number of elements equal to `x`.
    pub fn count(&self, x: K) -> usize {
        let lb = self.lower_bound(x);
        if lb == self.data.len() || self.data[lb] != x {
            return 0;
        }
        self.upper_bound(x) - lb
    }

    /// Keys inside `range`, ascending. Reverse the iterator for descending
    /// order; use `(Bound::Excluded(a), Bound::Included(b))` style pairs
    /// for exclusive endpoints.
    pub fn range<R>(&self, range: R) -> impl DoubleEndedIterator<Item = K> + '_
    where
        R: RangeBounds<K>,
    {
        let (start, end) = range_to_indices(
            range,
            self.data.len(),
            |k| self.lower_bound(*k),
            |k| self.upper_bound(*k),
        );
        self.data[start..end].iter().copied()
    }

    /// Element at position `i`; negative positions count from the end.
    pub fn at(&self, i: isize) -> Result<K, Error> {
        let n = self.data.len();
        let idx = if i < 0 { i + n as isize } else { i };
        if idx < 0 || idx as usize >= n {
            return Err(Error::IndexOutOfRange { index: i, len: n });
        }
        Ok(self.data[idx as usize])
    }

    /// Position of the first occurrence of `x`, restricted to
    /// `[start, stop)`. Bounds may be negative to count from the end.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when `x` is absent or its position falls
    /// outside the bounds.
    pub fn index_of(
        &self,
        x: K,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<usize, Error> {
        let n = self.data.len();
        let clamp = |i: isize| -> usize {
            if i < 0 {
                (i + n as isize).max(0) as usize
            } else {
                (i as usize).min(n)
            }
        };
        let left = clamp(start.unwrap_or(0));
        let right = clamp(stop.unwrap_or(n as isize));

        let i = self.lower_bound(x);
        if i == n || self.data[i] != x || i < left || i >= right {
            return Err(Error::KeyNotFound { key: x.to_string() });
        }
        Ok(i)
    }

    /// A new container over the stepped subsequence `[start, stop)`.
    ///
    /// Follows sequence slicing rules: negative indices count from the
    /// end, out-of-range indices clamp, and a negative step walks
    /// backwards (the result is stored ascending regardless).
    pub fn slice(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    ) -> Result<Self, Error> {
        let spec = slice::resolve(self.data.len(), start, stop, step)?;
        let mut out = Vec::with_capacity(spec.len);
        let mut idx = spec.start;
        for _ in 0..spec.len {
            out.push(self.data[idx as usize]);
            idx += spec.step;
        }
        if spec.step < 0 {
            out.reverse();
        }
        Ok(Self::from_sorted_vec(out, self.epsilon()))
    }

    // Set and multiset algebra. Results are fresh containers inheriting
    // the caller's epsilon; `_values` variants accept an arbitrary key
    // stream which is collected and sorted first.

    /// Sorted concatenation with `other`, duplicates preserved.
    pub fn merge(&self, other: &Self) -> Self {
        Self::from_sorted_vec(algebra::merge(&self.data, &other.data), self.epsilon())
    }

    pub fn merge_values<I: IntoIterator<Item = K>>(&self, values: I) -> Self {
        let tmp = algebra::collect_sorted(values);
        Self::from_sorted_vec(algebra::merge(&self.data, &tmp), self.epsilon())
    }

    /// Elements in either input, duplicates collapsed.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_sorted_vec(algebra::union_unique(&self.data, &other.data), self.epsilon())
    }

    pub fn union_values<I: IntoIterator<Item = K>>(&self, values: I) -> Self {
        let tmp = algebra::collect_sorted(values);
        Self::from_sorted_vec(algebra::union_unique(&self.data, &tmp), self.epsilon())
    }

    /// Elements common to both inputs.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateOperand`] when either container still holds
    /// duplicates; intersect deduplicated containers instead.
    pub fn intersection(&self, other: &Self) -> Result<Self, Error> {
        if self.duplicates || other.duplicates {
            return Err(Error::DuplicateOperand);
        }
        Ok(Self::from_sorted_vec(
            algebra::intersection(&self.data, &other.data),
            self.epsilon(),
        ))
    }

    /// Like [`Self::intersection`]; the value stream is deduplicated after
    /// sorting.
    pub fn intersection_values<I: IntoIterator<Item = K>>(&self, values: I) -> Result<Self, Error> {
        if self.duplicates {
            return Err(Error::DuplicateOperand);
        }
        let mut tmp = algebra::collect_sorted(values);
        tmp.dedup_by(|a, b| a == b);
        Ok(Self::from_sorted_vec(
            algebra::intersection(&self.data, &tmp),
            self.epsilon(),
        ))
    }

    /// Elements of `self` with every element equal to some element of
    /// `other` removed.
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_sorted_vec(algebra::difference(&self.data, &other.data), self.epsilon())
    }

    pub fn difference_values<I: IntoIterator<Item = K>>(&self, values: I) -> Self {
        let tmp = algebra::collect_sorted(values);
        Self::from_sorted_vec(algebra::difference(&self.data, &tmp), self.epsilon())
    }

    /// Elements in exactly one input, duplicates collapsed.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from_sorted_vec(
            algebra::symmetric_difference_unique(&self.data, &other.data),
            self.epsilon(),
        )
    }

    pub fn symmetric_difference_values<I: IntoIterator<Item = K>>(&self, values: I) -> Self {
        let tmp = algebra::collect_sorted(values);
        Self::from_sorted_vec(
            algebra::symmetric_difference_unique(&self.data, &tmp),
            self.epsilon(),
        )
    }

    /// True when every distinct element of `self` occurs in `other`. With
    /// `proper`, `other` must additionally own an element `self` lacks.
    pub fn is_subset(&self, other: &Self, proper: bool) -> bool {
        algebra::includes_unique(&other.data, &self.data, proper)
    }

    pub fn is_subset_of_values<I: IntoIterator<Item = K>>(&self, values: I, proper: bool) -> bool {
        let tmp = algebra::collect_sorted(values);
        algebra::includes_unique(&tmp, &self.data, proper)
    }

    /// True when every distinct element of `other` occurs in `self`.
    pub fn is_superset(&self, other: &Self, proper: bool) -> bool {
        algebra::includes_unique(&self.data, &other.data, proper)
    }

    pub fn is_superset_of_values<I: IntoIterator<Item = K>>(&self, values: I, proper: bool) -> bool {
        let tmp = algebra::collect_sorted(values);
        algebra::includes_unique(&self.data, &tmp, proper)
    }

    /// True when the containers share no element.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        algebra::is_disjoint(&self.data, &other.data)
    }

    /// Elementwise equality between the owned array and the sorted values.
    pub fn equal_to_values<I: IntoIterator<Item = K>>(&self, values: I) -> bool {
        self.data == algebra::collect_sorted(values)
    }
}

impl<K: Key> Clone for SortedContainer<K> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            index: self.index.clone(),
            duplicates: self.duplicates,
        }
    }
}

impl<K: Key> fmt::Debug for SortedContainer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

/// Elementwise equality of the owned sorted arrays.
impl<K: Key> PartialEq for SortedContainer<K> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<K: Key> Default for SortedContainer<K> {
    fn default() -> Self {
        Self::from_sorted_vec(Vec::new(), DEFAULT_EPSILON)
    }
}

impl<K: Key> FromIterator<K> for SortedContainer<K> {
    /// Collects with [`DEFAULT_EPSILON`], keeping duplicates.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_sorted_vec(algebra::collect_sorted(iter), DEFAULT_EPSILON)
    }
}

impl<K: Key> IntoIterator for SortedContainer<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, K: Key> IntoIterator for &'a SortedContainer<K> {
    type Item = K;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter().copied()
    }
}
