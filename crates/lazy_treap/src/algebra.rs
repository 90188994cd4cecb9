//! Algebras a [`Treap`](crate::Treap) is parameterized by.

/// An associative operation with a two-sided identity.
pub trait Monoid {
    type Value: Clone;

    fn unit() -> Self::Value;
    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value;
}

/// A monoid acted on by a monoid of lazy updates.
///
/// Implementations must satisfy:
///
/// - `act_apply(&act_unit(), x) == x`
/// - `act_apply(&act_compose(f, g), x) == act_apply(f, &act_apply(g, x))`
/// - `act_apply(f, &op(x, y)) == op(&act_apply(f, x), &act_apply(f, y))`
///
/// The last law lets an action be applied to a whole aggregate at once. None
/// of these are checked at runtime.
pub trait MapMonoid: Monoid {
    type Act: Clone;

    fn act_unit() -> Self::Act;

    /// Compose `new` after `old`.
    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act;

    fn act_apply(act: &Self::Act, value: &Self::Value) -> Self::Value;
}
