use std::mem;

use crate::algebra::MapMonoid;
use crate::rng::XorShift128;

pub(crate) type Link<P> = Option<Box<Node<P>>>;

pub(crate) struct Node<P: MapMonoid> {
    pub(crate) value: P::Value,
    /// Fold of the subtree in order.
    agg: P::Value,
    /// Fold of the subtree in reverse order.
    agg_rev: P::Value,
    /// Pending for the children; `value` and the aggregates already include it.
    lazy: P::Act,
    lazy_pending: bool,
    /// Children are already swapped here, their own subtrees are not.
    rev: bool,
    size: usize,
    prio: u32,
    left: Link<P>,
    right: Link<P>,
}

impl<P: MapMonoid> Clone for Node<P> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            agg: self.agg.clone(),
            agg_rev: self.agg_rev.clone(),
            lazy: self.lazy.clone(),
            lazy_pending: self.lazy_pending,
            rev: self.rev,
            size: self.size,
            prio: self.prio,
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<P: MapMonoid> Node<P> {
    pub(crate) fn leaf(value: P::Value, prio: u32) -> Box<Self> {
        Box::new(Self {
            agg: value.clone(),
            agg_rev: value.clone(),
            value,
            lazy: P::act_unit(),
            lazy_pending: false,
            rev: false,
            size: 1,
            prio,
            left: None,
            right: None,
        })
    }

    pub(crate) fn update(&mut self) {
        let mut size = 1;
        let mut agg = self.value.clone();
        let mut agg_rev = self.value.clone();
        if let Some(left) = self.left.as_deref() {
            size += left.size;
            agg = P::op(&left.agg, &agg);
            agg_rev = P::op(&agg_rev, &left.agg_rev);
        }
        if let Some(right) = self.right.as_deref() {
            size += right.size;
            agg = P::op(&agg, &right.agg);
            agg_rev = P::op(&right.agg_rev, &agg_rev);
        }
        self.size = size;
        self.agg = agg;
        self.agg_rev = agg_rev;
    }

    pub(crate) fn apply(&mut self, act: &P::Act) {
        self.value = P::act_apply(act, &self.value);
        self.agg = P::act_apply(act, &self.agg);
        self.agg_rev = P::act_apply(act, &self.agg_rev);
        self.lazy = P::act_compose(act, &self.lazy);
        self.lazy_pending = true;
    }

    pub(crate) fn toggle(&mut self) {
        mem::swap(&mut self.left, &mut self.right);
        mem::swap(&mut self.agg, &mut self.agg_rev);
        self.rev = !self.rev;
    }

    pub(crate) fn push(&mut self) {
        if self.lazy_pending {
            let act = mem::replace(&mut self.lazy, P::act_unit());
            self.lazy_pending = false;
            if let Some(left) = self.left.as_deref_mut() {
                left.apply(&act);
            }
            if let Some(right) = self.right.as_deref_mut() {
                right.apply(&act);
            }
        }
        if self.rev {
            self.rev = false;
            if let Some(left) = self.left.as_deref_mut() {
                left.toggle();
            }
            if let Some(right) = self.right.as_deref_mut() {
                right.toggle();
            }
        }
    }
}

pub(crate) fn size<P: MapMonoid>(link: &Link<P>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

pub(crate) fn agg<P: MapMonoid>(link: &Link<P>) -> P::Value {
    link.as_ref().map_or_else(P::unit, |node| node.agg.clone())
}

/// Splits off the first `k` elements.
pub(crate) fn split<P: MapMonoid>(link: Link<P>, k: usize) -> (Link<P>, Link<P>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    debug_assert!(k <= node.size);
    if k == 0 {
        return (None, Some(node));
    }
    if k == node.size {
        return (Some(node), None);
    }

    node.push();
    let left_size = size(&node.left);
    if k <= left_size {
        let (left, mid) = split(node.left.take(), k);
        node.left = mid;
        node.update();
        (left, Some(node))
    } else {
        let (mid, right) = split(node.right.take(), k - left_size - 1);
        node.right = mid;
        node.update();
        (Some(node), right)
    }
}

/// Concatenates `left` and `right`. On equal priorities the right root wins.
pub(crate) fn merge<P: MapMonoid>(left: Link<P>, right: Link<P>) -> Link<P> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            if left.prio > right.prio {
                left.push();
                left.right = merge(left.right.take(), Some(right));
                left.update();
                Some(left)
            } else {
                right.push();
                right.left = merge(Some(left), right.left.take());
                right.update();
                Some(right)
            }
        }
    }
}

/// Builds a treap over the next `len` values by merging balanced halves.
pub(crate) fn build<P, I>(values: &mut I, len: usize, rng: &mut XorShift128) -> Link<P>
where
    P: MapMonoid,
    I: Iterator<Item = P::Value>,
{
    match len {
        0 => None,
        1 => values.next().map(|value| Node::leaf(value, rng.next_u32())),
        _ => {
            let half = len / 2;
            let left = build(values, half, rng);
            let right = build(values, len - half, rng);
            merge(left, right)
        }
    }
}

pub(crate) fn get<P: MapMonoid>(link: &mut Link<P>, index: usize) -> Option<&P::Value> {
    let node = link.as_deref_mut()?;
    node.push();
    let left_size = size(&node.left);
    if index < left_size {
        get(&mut node.left, index)
    } else if index == left_size {
        Some(&node.value)
    } else {
        get(&mut node.right, index - left_size - 1)
    }
}

/// Visits values in logical order without pushing anything down.
///
/// `flip` and `act` are what the ancestors still owe this subtree.
pub(crate) fn for_each<P, F>(link: &Link<P>, flip: bool, act: &P::Act, f: &mut F)
where
    P: MapMonoid,
    F: FnMut(P::Value),
{
    let Some(node) = link.as_deref() else {
        return;
    };
    let (first, second) = if flip {
        (&node.right, &node.left)
    } else {
        (&node.left, &node.right)
    };
    let child_flip = flip ^ node.rev;
    let child_act = P::act_compose(act, &node.lazy);
    for_each(first, child_flip, &child_act, f);
    f(P::act_apply(act, &node.value));
    for_each(second, child_flip, &child_act, f);
}

#[cfg(test)]
pub(crate) fn check<P: MapMonoid>(link: &Link<P>) -> usize {
    let Some(node) = link.as_deref() else {
        return 0;
    };
    for child in [&node.left, &node.right].into_iter().flatten() {
        assert!(child.prio <= node.prio, "heap order broken");
    }
    let size = 1 + check(&node.left) + check(&node.right);
    assert_eq!(node.size, size, "stale subtree size");
    size
}
