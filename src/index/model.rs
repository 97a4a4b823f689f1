//! Streaming piecewise linear approximation with a bounded rank error.
//!
//! The builder keeps the cone of slopes through the open segment's origin
//! that satisfy `|slope * (key - origin) - rank| <= epsilon` for every
//! point accepted so far. A point that empties the cone closes the segment
//! with the cone's bisector slope and reopens at that point. Runs in
//! `O(m)` time with `O(1)` state.

use crate::index::key::Key;
use crate::index::segment::Segment;

/// Feasible slope interval through the current segment origin.
struct SlopeCone {
    lo: f64,
    hi: f64,
}

impl SlopeCone {
    fn new() -> Self {
        Self {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        }
    }

    /// Narrow the cone with the constraint of a point at `x_diff` from the
    /// origin and local rank `y`. Returns false when no slope remains.
    fn narrow(&mut self, x_diff: f64, y: f64, epsilon: f64) -> bool {
        if x_diff == 0.0 {
            // the origin itself
            return true;
        }
        let lo = self.lo.max((y - epsilon) / x_diff);
        let hi = self.hi.min((y + epsilon) / x_diff);
        if lo > hi {
            return false;
        }
        self.lo = lo;
        self.hi = hi;
        true
    }

    /// Bisector of the remaining feasible interval.
    fn slope(&self) -> f64 {
        if self.lo.is_infinite() && self.hi.is_infinite() {
            0.0
        } else if self.lo.is_infinite() {
            self.hi
        } else if self.hi.is_infinite() {
            self.lo
        } else {
            (self.lo + self.hi) / 2.0
        }
    }
}

struct Plr<K: Key> {
    epsilon: f64,
    origin_key: K,
    origin_rank: usize,
    cone: SlopeCone,
    open: bool,
    segments: Vec<Segment<K>>,
}

impl<K: Key> Plr<K> {
    fn new(epsilon: usize, capacity: usize) -> Self {
        Self {
            epsilon: epsilon as f64,
            origin_key: K::zero(),
            origin_rank: 0,
            cone: SlopeCone::new(),
            open: false,
            segments: Vec::with_capacity(capacity),
        }
    }

    fn reopen(&mut self, key: K, rank: usize) {
        self.origin_key = key;
        self.origin_rank = rank;
        self.cone = SlopeCone::new();
        self.open = true;
    }

    fn close(&mut self) {
        self.segments.push(Segment::new(
            self.origin_key,
            self.cone.slope(),
            self.origin_rank as f64,
        ));
    }

    /// Feed the next point. Keys and ranks must arrive strictly increasing.
    fn feed(&mut self, key: K, rank: usize) {
        if !self.open {
            self.reopen(key, rank);
            return;
        }
        let x = key.distance_from(self.origin_key);
        let y = (rank - self.origin_rank) as f64;
        if !self.cone.narrow(x, y, self.epsilon) {
            self.close();
            self.reopen(key, rank);
        }
    }

    fn finish(mut self) -> Vec<Segment<K>> {
        if self.open {
            self.close();
        }
        self.segments
    }
}

/// Segment a sorted key sequence so that every emitted segment predicts the
/// rank of each covered key within `epsilon`.
///
/// Only the first occurrence of each distinct key is fed to the model, so
/// predictions target the leftmost rank of a key. A duplicate run is
/// additionally anchored at its tail by a phantom point at the successor
/// key, provided that successor is still below the next distinct key (or
/// the run ends the sequence). Without the anchor, a query falling just
/// above a long run would be predicted near the run's head instead of its
/// end.
pub(crate) fn build_segments<K: Key>(keys: &[K], epsilon: usize) -> Vec<Segment<K>> {
    let n = keys.len();
    if n == 0 {
        return Vec::new();
    }

    let mut plr = Plr::new(epsilon, n / (2 * epsilon.max(1)) + 1);
    let mut i = 0;
    while i < n {
        let x = keys[i];
        let mut j = i + 1;
        while j < n && keys[j] == x {
            j += 1;
        }
        plr.feed(x, i);
        if j - i >= 2 {
            let succ = x.next_up();
            if succ > x && (j == n || succ < keys[j]) {
                plr.feed(succ, j - 1);
            }
        }
        i = j;
    }
    plr.finish()
}
