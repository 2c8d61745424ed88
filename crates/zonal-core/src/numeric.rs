//! Numeric trait for values that can bound a range
//!
//! Ranges are generic over the ordered numeric type of their endpoints. Floating
//! point types carry sentinel values (NaN and the two infinities) that ranges
//! translate into open bounds or special points; integer types never do.
//!
//! # Design Philosophy
//!
//! - **Pure type constraints**: Only describes what a range needs from its values
//! - **Sentinel detection**: NaN and infinities are recognised per type, not by casting
//! - **Extensible**: Any `Copy + PartialOrd` primitive can be added with the macros below

use num_traits::{Float, ToPrimitive};
use std::fmt::{Debug, Display};

/// An ordered numeric type usable as a range endpoint
pub trait RangeValue:
    Copy + PartialOrd + Debug + Display + ToPrimitive + Send + Sync + 'static
{
    /// Whether the value is the NaN sentinel
    fn is_nan_value(&self) -> bool {
        false
    }

    /// Whether the value is positive infinity
    fn is_pos_infinite(&self) -> bool {
        false
    }

    /// Whether the value is negative infinity
    fn is_neg_infinite(&self) -> bool {
        false
    }

    /// Whether the value is an ordinary finite number
    fn is_finite_value(&self) -> bool {
        !(self.is_nan_value() || self.is_pos_infinite() || self.is_neg_infinite())
    }

    /// Bit pattern used for hashing, consistent with `PartialEq`
    fn hash_bits(&self) -> u64;
}

macro_rules! impl_range_value_float {
    ($($t:ty),*) => {
        $(
            impl RangeValue for $t {
                fn is_nan_value(&self) -> bool {
                    Float::is_nan(*self)
                }

                fn is_pos_infinite(&self) -> bool {
                    Float::is_infinite(*self) && Float::is_sign_positive(*self)
                }

                fn is_neg_infinite(&self) -> bool {
                    Float::is_infinite(*self) && Float::is_sign_negative(*self)
                }

                fn hash_bits(&self) -> u64 {
                    // -0.0 == 0.0, so both must hash alike
                    let v = f64::from(*self);
                    if v == 0.0 { 0 } else { v.to_bits() }
                }
            }
        )*
    };
}

macro_rules! impl_range_value_int {
    ($($t:ty),*) => {
        $(
            impl RangeValue for $t {
                fn hash_bits(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_range_value_float!(f32, f64);
impl_range_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
