use crate::algebra::{MapMonoid, Monoid};

/// Range sum without updates.
pub struct RangeSum;

impl Monoid for RangeSum {
    type Value = i64;

    fn unit() -> Self::Value {
        0
    }

    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        left + right
    }
}

impl MapMonoid for RangeSum {
    type Act = ();

    fn act_unit() -> Self::Act {}

    fn act_compose(_new: &Self::Act, _old: &Self::Act) -> Self::Act {}

    fn act_apply(_act: &Self::Act, value: &Self::Value) -> Self::Value {
        *value
    }
}

/// A sum together with the number of summed elements.
///
/// Adding a constant to every element of a range needs the range length, so
/// range-add algebras carry it inside the value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SumLen {
    pub sum: i64,
    pub len: i64,
}

impl SumLen {
    pub fn new(value: i64) -> Self {
        Self { sum: value, len: 1 }
    }
}

impl From<i64> for SumLen {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// Range sum with range add.
pub struct RangeSumRangeAdd;

impl Monoid for RangeSumRangeAdd {
    type Value = SumLen;

    fn unit() -> Self::Value {
        SumLen::default()
    }

    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        SumLen {
            sum: left.sum + right.sum,
            len: left.len + right.len,
        }
    }
}

impl MapMonoid for RangeSumRangeAdd {
    type Act = i64;

    fn act_unit() -> Self::Act {
        0
    }

    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        new + old
    }

    fn act_apply(act: &Self::Act, value: &Self::Value) -> Self::Value {
        SumLen {
            sum: value.sum + act * value.len,
            len: value.len,
        }
    }
}

/// Range minimum with range add. The identity is `i64::MAX` and stays fixed
/// under every action.
pub struct RangeMinRangeAdd;

impl Monoid for RangeMinRangeAdd {
    type Value = i64;

    fn unit() -> Self::Value {
        i64::MAX
    }

    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        *left.min(right)
    }
}

impl MapMonoid for RangeMinRangeAdd {
    type Act = i64;

    fn act_unit() -> Self::Act {
        0
    }

    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        new + old
    }

    fn act_apply(act: &Self::Act, value: &Self::Value) -> Self::Value {
        if *value == i64::MAX {
            *value
        } else {
            value + act
        }
    }
}

pub const MOD: u64 = 998_244_353;

/// A sum modulo [`MOD`] together with the element count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModSum {
    pub sum: u64,
    pub len: u64,
}

impl ModSum {
    pub fn new(value: u64) -> Self {
        Self {
            sum: value % MOD,
            len: 1,
        }
    }
}

/// The map `x -> a * x + b` modulo [`MOD`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine {
    pub a: u64,
    pub b: u64,
}

impl Affine {
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            a: a % MOD,
            b: b % MOD,
        }
    }

    pub fn eval(&self, x: u64) -> u64 {
        (self.a * (x % MOD) + self.b) % MOD
    }
}

/// Range sum with range affine update, modulo [`MOD`].
pub struct RangeAffineRangeSum;

impl Monoid for RangeAffineRangeSum {
    type Value = ModSum;

    fn unit() -> Self::Value {
        ModSum::default()
    }

    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        ModSum {
            sum: (left.sum + right.sum) % MOD,
            len: left.len + right.len,
        }
    }
}

impl MapMonoid for RangeAffineRangeSum {
    type Act = Affine;

    fn act_unit() -> Self::Act {
        Affine { a: 1, b: 0 }
    }

    fn act_compose(new: &Self::Act, old: &Self::Act) -> Self::Act {
        // new(old(x)) = new.a * (old.a * x + old.b) + new.b
        Affine {
            a: new.a * old.a % MOD,
            b: (new.a * old.b + new.b) % MOD,
        }
    }

    fn act_apply(act: &Self::Act, value: &Self::Value) -> Self::Value {
        ModSum {
            sum: (act.a * value.sum + act.b * (value.len % MOD)) % MOD,
            len: value.len,
        }
    }
}
