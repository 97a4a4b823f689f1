//! Linear kernels over sorted key slices.
//!
//! Every function walks its inputs once and allocates at most
//! `|a| + |b|` keys for the output. The duplicate-collapsing variants
//! treat each run of equal keys as a single element.

use core::cmp::Ordering;

use crate::index::key::Key;

#[inline]
fn skip_run<K: Key>(keys: &[K], mut i: usize, x: K) -> usize {
    while i < keys.len() && keys[i] == x {
        i += 1;
    }
    i
}

/// Append the distinct values of `rest` to `out`.
fn extend_unique<K: Key>(out: &mut Vec<K>, rest: &[K]) {
    let mut i = 0;
    while i < rest.len() {
        let x = rest[i];
        out.push(x);
        i = skip_run(rest, i, x);
    }
}

/// Sorted concatenation, preserving duplicates from both sides.
pub(crate) fn merge<K: Key>(a: &[K], b: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if b[j].key_cmp(&a[i]) == Ordering::Less {
            out.push(b[j]);
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Sorted union with duplicates collapsed across both inputs.
pub(crate) fn union_unique<K: Key>(a: &[K], b: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let x = if b[j].key_cmp(&a[i]) == Ordering::Less {
            b[j]
        } else {
            a[i]
        };
        out.push(x);
        i = skip_run(a, i, x);
        j = skip_run(b, j, x);
    }
    extend_unique(&mut out, &a[i..]);
    extend_unique(&mut out, &b[j..]);
    out
}

/// Sorted intersection of two duplicate-free inputs.
pub(crate) fn intersection<K: Key>(a: &[K], b: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].key_cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Subsequence of `a` with every element equal to some element of `b`
/// removed. One occurrence in `b` removes all equal occurrences in `a`;
/// unmatched duplicates of `a` are kept copy for copy.
pub(crate) fn difference<K: Key>(a: &[K], b: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() {
        let x = a[i];
        while j < b.len() && b[j].key_cmp(&x) == Ordering::Less {
            j += 1;
        }
        if j < b.len() && b[j] == x {
            i = skip_run(a, i, x);
        } else {
            out.push(x);
            i += 1;
        }
    }
    out
}

/// Elements appearing in exactly one input, duplicates collapsed.
pub(crate) fn symmetric_difference_unique<K: Key>(a: &[K], b: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() {
        if j == b.len() {
            extend_unique(&mut out, &a[i..]);
            return out;
        }
        match a[i].key_cmp(&b[j]) {
            Ordering::Less => {
                let x = a[i];
                out.push(x);
                i = skip_run(a, i, x);
            }
            Ordering::Greater => {
                let x = b[j];
                out.push(x);
                j = skip_run(b, j, x);
            }
            Ordering::Equal => {
                let x = a[i];
                i = skip_run(a, i, x);
                j = skip_run(b, j, x);
            }
        }
    }
    extend_unique(&mut out, &b[j..]);
    out
}

/// True when every distinct value of `needles` occurs in `hay`. With
/// `proper`, `hay` must additionally own a distinct value that `needles`
/// lacks.
pub(crate) fn includes_unique<K: Key>(hay: &[K], needles: &[K], proper: bool) -> bool {
    let (mut i, mut j) = (0, 0);
    let mut extra = false;
    while j < needles.len() {
        let x = needles[j];
        while i < hay.len() && hay[i].key_cmp(&x) == Ordering::Less {
            extra = true;
            i = skip_run(hay, i, hay[i]);
        }
        if i == hay.len() || hay[i] != x {
            return false;
        }
        i = skip_run(hay, i, x);
        j = skip_run(needles, j, x);
    }
    if i < hay.len() {
        extra = true;
    }
    !proper || extra
}

/// True when the inputs share no value.
pub(crate) fn is_disjoint<K: Key>(a: &[K], b: &[K]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].key_cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => return false,
        }
    }
    true
}

/// Collect an arbitrary key stream into a sorted buffer, sorting only when
/// the values did not already arrive in order.
pub(crate) fn collect_sorted<K, I>(values: I) -> Vec<K>
where
    K: Key,
    I: IntoIterator<Item = K>,
{
    let iter = values.into_iter();
    let mut out: Vec<K> = Vec::with_capacity(iter.size_hint().0);
    let mut sorted = true;
    for x in iter {
        if let Some(last) = out.last() {
            if x.key_cmp(last) == Ordering::Less {
                sorted = false;
            }
        }
        out.push(x);
    }
    if !sorted {
        out.sort_unstable_by(K::key_cmp);
    }
    out
}
