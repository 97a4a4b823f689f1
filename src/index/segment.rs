use crate::index::key::Key;

/// One linear model of the piecewise approximation.
///
/// A segment predicts the rank of a key as
/// `slope * (key - origin) + intercept`, where `key` is the origin and
/// `intercept` is the rank of the first element the segment covers.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<K: Key> {
    pub key: K,
    pub slope: f64,
    pub intercept: f64,
}

impl<K: Key> Segment<K> {
    #[inline]
    pub fn new(key: K, slope: f64, intercept: f64) -> Self {
        Self {
            key,
            slope,
            intercept,
        }
    }

    /// Trailing sentinel of a level. Its intercept is the size of whatever
    /// the level predicts into, so it bounds the prediction of the last
    /// real segment.
    #[inline]
    pub(crate) fn sentinel(below: usize) -> Self {
        Self {
            key: K::max_value(),
            slope: 0.0,
            intercept: below as f64,
        }
    }

    /// Predicted rank of `key`, rounded to nearest and clamped below at 0.
    /// Callers clamp above with the next segment's intercept; `key` must
    /// not be below the origin.
    #[inline(always)]
    pub fn predict(&self, key: K) -> usize {
        let pos = (self.intercept + self.slope * key.distance_from(self.key)).round();
        if pos > 0.0 { pos as usize } else { 0 }
    }
}
