//! An implicit-key treap: a sequence supporting insertion, removal, range
//! reversal, range folds over a monoid and lazily propagated range updates,
//! each in expected `O(log n)`.
//!
//! The algebra is chosen at compile time through [`MapMonoid`].
//!
//! ```
//! use lazy_treap::{RangeSumRangeAdd, SumLen, Treap};
//!
//! let mut treap: Treap<RangeSumRangeAdd> = (1..=5).map(SumLen::new).collect();
//! assert_eq!(treap.prod(1..4).sum, 9);
//! treap.apply(.., 10);
//! treap.reverse(..);
//! assert_eq!(treap.erase(0).sum, 15);
//! ```

mod algebra;
mod node;
mod policy;
mod rng;
mod treap;

pub use algebra::{MapMonoid, Monoid};
pub use policy::{
    Affine, MOD, ModSum, RangeAffineRangeSum, RangeMinRangeAdd, RangeSum, RangeSumRangeAdd, SumLen,
};
pub use treap::Treap;
