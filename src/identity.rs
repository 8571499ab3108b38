//! Identity comparison for selected slices.
//!
//! A slice counts as changed when it is no longer *the same* value: scalars
//! and strings compare by value, shared pointers compare by address. Nothing
//! here looks inside a composite, so a freshly allocated `Arc` with equal
//! contents is still a change.

use std::rc::Rc;
use std::sync::Arc;

/// "Same value or same reference" comparison.
///
/// Implement this for your own slice types only when they behave like
/// scalars. Wrap anything composite in an [`Arc`] instead. The only
/// borrowed slice supported is `&'static str`, which compares by value.
pub trait Identity {
    /// Returns true when `self` and `other` are the same value.
    fn same(&self, other: &Self) -> bool;
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, String, str,
);

macro_rules! identity_float {
    ($($ty:ty),*) => {
        $(
            /// `NaN` is the same as any `NaN`; `0.0` and `-0.0` are distinct.
            impl Identity for $ty {
                #[inline]
                fn same(&self, other: &Self) -> bool {
                    (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
                }
            }
        )*
    };
}

identity_float!(f32, f64);

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl Identity for &'static str {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Identity> Identity for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same(b),
            _ => false,
        }
    }
}

macro_rules! identity_tuple {
    ($(($($name:ident : $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Identity),+> Identity for ($($name,)+) {
                fn same(&self, other: &Self) -> bool {
                    $(self.$idx.same(&other.$idx))&&+
                }
            }
        )*
    };
}

identity_tuple!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
);
