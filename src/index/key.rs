use core::cmp::Ordering;
use core::fmt;

use num_traits::{Bounded, NumCast, ToPrimitive, Zero};

/// Numeric key type indexable by the piecewise linear models.
///
/// Implemented for the six exported instantiations: `i32`, `u32`, `i64`,
/// `u64`, `f32` and `f64`. Keys are totally ordered under their natural
/// numeric order; floating-point keys must not be NaN (queries on a
/// container holding NaN return unspecified positions, though nothing
/// unsafe happens).
pub trait Key:
    Copy
    + PartialOrd
    + Default
    + Send
    + Sync
    + Bounded
    + Zero
    + ToPrimitive
    + NumCast
    + fmt::Display
    + fmt::Debug
    + 'static
{
    /// Total order used for sorting and searching.
    fn key_cmp(&self, other: &Self) -> Ordering;

    /// `self - origin` as `f64`, with `self >= origin`.
    ///
    /// The subtraction happens in the key domain so that 64-bit keys far
    /// from zero do not lose the low bits before the difference is taken.
    /// Slopes and intercepts are kept in double precision regardless of
    /// the key width.
    fn distance_from(self, origin: Self) -> f64;

    /// The smallest representable key greater than `self`, saturating at
    /// the type maximum.
    fn next_up(self) -> Self;
}

macro_rules! impl_key_int {
    ($(($t:ty, $u:ty)),*) => {
        $(
            impl Key for $t {
                #[inline]
                fn key_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline]
                fn distance_from(self, origin: Self) -> f64 {
                    debug_assert!(self >= origin);
                    self.wrapping_sub(origin) as $u as f64
                }

                #[inline]
                fn next_up(self) -> Self {
                    self.saturating_add(1)
                }
            }
        )*
    };
}

macro_rules! impl_key_float {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                #[inline]
                fn key_cmp(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }

                #[inline]
                fn distance_from(self, origin: Self) -> f64 {
                    self as f64 - origin as f64
                }

                #[inline]
                fn next_up(self) -> Self {
                    let up = <$t>::next_up(self);
                    if up.is_finite() { up } else { <$t>::MAX }
                }
            }
        )*
    };
}

impl_key_int!((i32, u32), (u32, u32), (i64, u64), (u64, u64));
impl_key_float!(f32, f64);

/// The larger of two keys under the total order.
#[inline]
pub(crate) fn key_max<K: Key>(a: K, b: K) -> K {
    if a.key_cmp(&b) == Ordering::Less { b } else { a }
}
