//! Merge operators applied bottom-up by the tree.
//!
//! A [`Merge`] is an associative binary operator plus its identity element.
//! The identity is what a subtree with no overlap contributes to a query, so
//! it must be neutral for every value the tree can hold. Swapping the operator
//! is all it takes to turn the max tree into a min, sum or gcd tree.

use std::marker::PhantomData;

pub trait Merge {
    type Value: Copy;

    fn identity() -> Self::Value;
    fn combine(left: Self::Value, right: Self::Value) -> Self::Value;
}

/// Integer bounds used to pick identity elements.
pub trait Bounded: Copy {
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;
    const ZERO: Self;
}

macro_rules! impl_bounded {
    ($($t:ty),*) => {
        $(
            impl Bounded for $t {
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;
                const ZERO: Self = 0;
            }
        )*
    };
}

impl_bounded!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Maximum. Identity is the smallest representable value, so negative inputs
/// are never masked by an empty subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max<T>(PhantomData<T>);

impl<T: Bounded + Ord> Merge for Max<T> {
    type Value = T;

    #[inline]
    fn identity() -> T {
        T::MIN_VALUE
    }

    #[inline]
    fn combine(left: T, right: T) -> T {
        left.max(right)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min<T>(PhantomData<T>);

impl<T: Bounded + Ord> Merge for Min<T> {
    type Value = T;

    #[inline]
    fn identity() -> T {
        T::MAX_VALUE
    }

    #[inline]
    fn combine(left: T, right: T) -> T {
        left.min(right)
    }
}

/// Wrapping sum, so aggregates never panic on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum<T>(PhantomData<T>);

/// Greatest common divisor; `gcd(0, x) == x`.
///
/// Only unsigned types implement it. A signed gcd cannot represent
/// `gcd(MIN, 0)`, and clamping that result breaks associativity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gcd<T>(PhantomData<T>);

macro_rules! impl_sum {
    ($($t:ty),*) => {
        $(
            impl Merge for Sum<$t> {
                type Value = $t;

                #[inline]
                fn identity() -> $t {
                    0
                }

                #[inline]
                fn combine(left: $t, right: $t) -> $t {
                    left.wrapping_add(right)
                }
            }
        )*
    };
}

impl_sum!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_gcd_unsigned {
    ($($t:ty),*) => {
        $(
            impl Merge for Gcd<$t> {
                type Value = $t;

                #[inline]
                fn identity() -> $t {
                    0
                }

                fn combine(mut a: $t, mut b: $t) -> $t {
                    while b != 0 {
                        let t = a % b;
                        a = b;
                        b = t;
                    }
                    a
                }
            }
        )*
    };
}

impl_gcd_unsigned!(u8, u16, u32, u64, u128, usize);

/// The max operator on machine words.
#[inline]
pub fn combine(x: i64, y: i64) -> i64 {
    Max::<i64>::combine(x, y)
}
