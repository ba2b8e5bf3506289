use std::fmt::{Debug, Display};
use std::ops::{Add, Mul};

/// Types that can be stored in sparse containers.
///
/// Node ids are stored as unsigned integers and edge weights as floats; the
/// conversions to and from `f64` and `usize` are used by operators that mix
/// operand types (e.g., a product propagating node ids across a weighted
/// matrix).
pub trait Element:
    Copy
    + Send
    + Sync
    + Debug
    + Display
    + PartialOrd
    + Add<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    /// A value of this type that no legitimate entry takes: positive
    /// infinity for floats, the maximum value for unsigned integers.
    ///
    /// Used by the factory methods of [`Context`](super::Context) as the
    /// fill value of new containers.
    const SENTINEL: Self;

    /// Zero.
    const ZERO: Self;

    /// One.
    const ONE: Self;

    /// Converts to `f64`.
    fn to_f64(self) -> f64;

    /// Converts from `f64`, truncating if necessary.
    fn from_f64(v: f64) -> Self;

    /// Converts from `f64`, returning `None` if the value is out of range
    /// or, for integer types, not integral. Floats may be rounded.
    fn try_from_f64(v: f64) -> Option<Self>;

    /// Converts a node id or a counter into this type.
    fn from_index(index: usize) -> Self;

    /// Converts this value into a node id.
    fn to_index(self) -> usize;
}

macro_rules! checked_conversion {
    (int, $v:expr, $c:expr) => {
        ($c as f64 == $v).then_some($c)
    };
    (float, $v:expr, $c:expr) => {
        ($c.is_finite() || $v.is_infinite()).then_some($c)
    };
}

macro_rules! impl_element {
    ($kind:ident: $($ty:ty => $sentinel:expr),* $(,)?) => {$(
        impl Element for $ty {
            const SENTINEL: Self = $sentinel;
            const ZERO: Self = 0 as $ty;
            const ONE: Self = 1 as $ty;

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }

            #[inline(always)]
            fn try_from_f64(v: f64) -> Option<Self> {
                let converted = v as $ty;
                checked_conversion!($kind, v, converted)
            }

            #[inline(always)]
            fn from_index(index: usize) -> Self {
                index as $ty
            }

            #[inline(always)]
            fn to_index(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_element! {
    int: u32 => u32::MAX,
    u64 => u64::MAX,
    usize => usize::MAX,
}

impl_element! {
    float: f32 => f32::INFINITY,
    f64 => f64::INFINITY,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_try_from_f64() {
        assert_eq!(u32::try_from_f64(7.0), Some(7));
        assert_eq!(u32::try_from_f64(-3.0), None);
        assert_eq!(u32::try_from_f64(2.5), None);
        assert_eq!(u32::try_from_f64(4294967296.0), None);
        assert_eq!(f32::try_from_f64(0.1), Some(0.1));
        assert_eq!(f32::try_from_f64(1E300), None);
        assert_eq!(f32::try_from_f64(f64::INFINITY), Some(f32::INFINITY));
        assert_eq!(f64::try_from_f64(-2.5), Some(-2.5));
    }
}
