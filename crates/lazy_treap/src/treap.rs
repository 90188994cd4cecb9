use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::algebra::MapMonoid;
use crate::node::{self, Link, Node};
use crate::rng::{DEFAULT_SEED, XorShift128};

/// A sequence stored in an implicit-key treap.
///
/// Positions are zero-based in-order ranks. Every operation runs in expected
/// `O(log n)` time. Out-of-range positions and malformed ranges panic.
pub struct Treap<P: MapMonoid> {
    root: Link<P>,
    rng: XorShift128,
}

#[track_caller]
fn bounds<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    assert!(start <= end, "range start {start} is greater than end {end}");
    assert!(end <= len, "range end {end} is out of bounds for length {len}");
    (start, end)
}

impl<P: MapMonoid> Treap<P> {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            rng: XorShift128::new(seed),
        }
    }

    /// `len` copies of the identity element.
    pub fn with_len(len: usize) -> Self {
        Self::from_vec(vec![P::unit(); len])
    }

    pub fn from_vec(values: Vec<P::Value>) -> Self {
        Self::from_vec_with_seed(values, DEFAULT_SEED)
    }

    pub fn from_vec_with_seed(values: Vec<P::Value>, seed: u64) -> Self {
        let mut treap = Self::with_seed(seed);
        let len = values.len();
        treap.root = node::build(&mut values.into_iter(), len, &mut treap.rng);
        treap
    }

    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get(&mut self, index: usize) -> Option<&P::Value> {
        if index >= self.len() {
            return None;
        }
        node::get(&mut self.root, index)
    }

    /// Inserts `value` so that it ends up at position `index`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: P::Value) {
        let len = self.len();
        assert!(index <= len, "insert index {index} is out of bounds for length {len}");
        let leaf = Some(Node::leaf(value, self.rng.next_u32()));
        let (left, right) = node::split(self.root.take(), index);
        self.root = node::merge(node::merge(left, leaf), right);
    }

    /// Removes and returns the value at `index`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> P::Value {
        let len = self.len();
        assert!(index < len, "erase index {index} is out of bounds for length {len}");
        let (rest, right) = node::split(self.root.take(), index + 1);
        let (left, target) = node::split(rest, index);
        self.root = node::merge(left, right);
        match target {
            Some(target) => target.value,
            None => unreachable!("split produced no node for an in-bounds index"),
        }
    }

    /// Cuts out `[start, end)`, runs `f` on it and glues the pieces back.
    fn with_range<T>(
        &mut self,
        start: usize,
        end: usize,
        f: impl FnOnce(&mut Link<P>) -> T,
    ) -> T {
        let (rest, right) = node::split(self.root.take(), end);
        let (left, mut mid) = node::split(rest, start);
        let out = f(&mut mid);
        self.root = node::merge(node::merge(left, mid), right);
        out
    }

    /// Reverses the order of the elements in `range`.
    #[track_caller]
    pub fn reverse<R: RangeBounds<usize>>(&mut self, range: R) {
        let (start, end) = bounds(range, self.len());
        if end - start < 2 {
            return;
        }
        self.with_range(start, end, |mid| {
            if let Some(mid) = mid.as_deref_mut() {
                mid.toggle();
            }
        });
    }

    /// Folds `range` left to right with the monoid operation.
    #[track_caller]
    pub fn prod<R: RangeBounds<usize>>(&mut self, range: R) -> P::Value {
        let (start, end) = bounds(range, self.len());
        if start == end {
            return P::unit();
        }
        self.with_range(start, end, |mid| node::agg(mid))
    }

    /// Applies `act` to every element in `range`.
    #[track_caller]
    pub fn apply<R: RangeBounds<usize>>(&mut self, range: R, act: P::Act) {
        let (start, end) = bounds(range, self.len());
        if start == end {
            return;
        }
        self.with_range(start, end, |mid| {
            if let Some(mid) = mid.as_deref_mut() {
                mid.apply(&act);
            }
        });
    }

    /// Rotates `range` right by one: the last element moves to the front.
    ///
    /// Ranges shorter than two elements are left as they are.
    #[track_caller]
    pub fn shift<R: RangeBounds<usize>>(&mut self, range: R) {
        let (start, end) = bounds(range, self.len());
        if end - start < 2 {
            return;
        }
        let (rest, right) = node::split(self.root.take(), end);
        let (rest, last) = node::split(rest, end - 1);
        let (left, mid) = node::split(rest, start);
        self.root = node::merge(node::merge(node::merge(left, last), mid), right);
    }

    /// Keeps `[0, at)` and returns `[at, len)` as a new treap.
    #[track_caller]
    pub fn split_off(&mut self, at: usize) -> Self {
        let len = self.len();
        assert!(at <= len, "split index {at} is out of bounds for length {len}");
        let (left, right) = node::split(self.root.take(), at);
        self.root = left;
        Self {
            root: right,
            rng: self.rng.fork(),
        }
    }

    /// Moves every element of `other` to the end of `self`.
    pub fn append(&mut self, other: Self) {
        self.root = node::merge(self.root.take(), other.root);
    }

    /// The values in order, with pending updates applied.
    pub fn to_vec(&self) -> Vec<P::Value> {
        let mut out = Vec::with_capacity(self.len());
        node::for_each(&self.root, false, &P::act_unit(), &mut |value| {
            out.push(value)
        });
        out
    }
}

impl<P: MapMonoid> Default for Treap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MapMonoid> Clone for Treap<P> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            rng: self.rng,
        }
    }
}

impl<P> fmt::Debug for Treap<P>
where
    P: MapMonoid,
    P::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

impl<P: MapMonoid> From<Vec<P::Value>> for Treap<P> {
    fn from(values: Vec<P::Value>) -> Self {
        Self::from_vec(values)
    }
}

impl<P: MapMonoid> FromIterator<P::Value> for Treap<P> {
    fn from_iter<I: IntoIterator<Item = P::Value>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<P: MapMonoid> Extend<P::Value> for Treap<P> {
    fn extend<I: IntoIterator<Item = P::Value>>(&mut self, iter: I) {
        let values: Vec<_> = iter.into_iter().collect();
        let len = values.len();
        let tail = node::build(&mut values.into_iter(), len, &mut self.rng);
        self.root = node::merge(self.root.take(), tail);
    }
}
