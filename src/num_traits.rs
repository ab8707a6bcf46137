//! # Numeric traits
//!
//! The algorithms are generic over the scalar carried by an edge:
//!
//! - **`Weight`**: the value of an undirected edge in a spanning-tree problem.
//!   Implemented for all primitive integers and floats. Floats are compared
//!   with `total_cmp`, and `NaN` is rejected up front through
//!   [`Weight::is_comparable`], so sorting and priority queues always see a
//!   total order.
//!
//! - **`Capacity`**: the unsigned integral capacity (and flow) of a directed
//!   network edge. Arithmetic goes through checked operations so that an
//!   overflow surfaces as an error instead of wrapping.

use duplicate::duplicate;
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::Hash,
    ops::Add,
};

pub trait Weight: Copy + Debug + PartialEq + PartialOrd + Add<Output = Self> {
    fn zero() -> Self;

    /// `false` for values with no place in a total order (float `NaN`).
    fn is_comparable(&self) -> bool;

    fn weight_cmp(&self, other: &Self) -> Ordering;

    /// `None` on integer overflow. Floats saturate to infinity instead.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

pub trait Capacity: Copy + Debug + Display + Ord + Hash {
    fn zero() -> Self;

    fn one() -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn checked_sub(self, rhs: Self) -> Option<Self>;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

duplicate! {
    [types;
        [i8];
        [i16];
        [i32];
        [i64];
        [i128];
        [isize];
        [u8];
        [u16];
        [u32];
        [u64];
        [u128];
        [usize];
        ]

    impl Weight for types {
        fn zero() -> Self {
            0
        }

        fn is_comparable(&self) -> bool {
            true
        }

        fn weight_cmp(&self, other: &Self) -> Ordering {
            Ord::cmp(self, other)
        }

        fn checked_add(self, rhs: Self) -> Option<Self> {
            types::checked_add(self, rhs)
        }
    }
}

duplicate! {
    [types;
        [f32];
        [f64];
        ]

    impl Weight for types {
        fn zero() -> Self {
            0.0
        }

        fn is_comparable(&self) -> bool {
            !self.is_nan()
        }

        fn weight_cmp(&self, other: &Self) -> Ordering {
            self.total_cmp(other)
        }

        fn checked_add(self, rhs: Self) -> Option<Self> {
            Some(self + rhs)
        }
    }
}

duplicate! {
    [types;
        [u8];
        [u16];
        [u32];
        [u64];
        [u128];
        [usize];
        ]

    impl Capacity for types {
        fn zero() -> Self {
            0
        }

        fn one() -> Self {
            1
        }

        fn checked_add(self, rhs: Self) -> Option<Self> {
            types::checked_add(self, rhs)
        }

        fn checked_sub(self, rhs: Self) -> Option<Self> {
            types::checked_sub(self, rhs)
        }
    }
}
