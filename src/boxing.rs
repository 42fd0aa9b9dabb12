//! Widening of primitive arguments to hashable object values.
//!
//! [`Function::boxed`](crate::function::Function) widens every argument
//! position through [`Widen`]. Primitives become [`Boxed<T>`], whose equality
//! and hashing are total even for floating-point values, so a function over
//! `f64` can be memoized once boxed. Object types widen to themselves.
//!
//! # Float Identity
//!
//! `Boxed<f32>` and `Boxed<f64>` compare by bit pattern after collapsing
//! every NaN to one canonical NaN:
//!
//! - `Boxed(f64::NAN) == Boxed(f64::NAN)`
//! - `Boxed(0.0) != Boxed(-0.0)`
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::boxing::Boxed;
//! use fnwrap::function::Function;
//!
//! let hypotenuse = Function::binary(|x: f64, y: f64| x.hypot(y));
//! let memoized = hypotenuse
//!     .boxed()
//!     .memoized()
//!     .compose(Boxed::new, Boxed::new);
//!
//! assert_eq!(memoized.apply(3.0, 4.0), 5.0);
//! assert_eq!(memoized.apply(3.0, 4.0), 5.0);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// Conversion of an argument type to and from its object form.
///
/// Implement it for your own argument types with [`widen_as_object!`](crate::widen_as_object)
/// to make them usable with `boxed()`.
pub trait Widen: Sized {
    /// The object form of the type.
    type Object;

    /// Converts a value into its object form.
    fn widen(self) -> Self::Object;

    /// Converts an object back into the value it was widened from.
    fn narrow(object: Self::Object) -> Self;
}

/// A primitive value in object form, with total equality and hashing.
///
/// # Examples
///
/// ```rust
/// use fnwrap::boxing::Boxed;
/// use std::collections::HashSet;
///
/// let keys: HashSet<Boxed<f64>> = [1.5, f64::NAN, f64::NAN, 1.5].into_iter().map(Boxed::new).collect();
/// assert_eq!(keys.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Boxed<T>(T);

impl<T> Boxed<T> {
    /// Wraps a value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns a reference to the wrapped value.
    #[inline]
    pub const fn get(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Boxed<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Display for Boxed<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(formatter)
    }
}

macro_rules! widen_primitive {
    ($($primitive:ty),+ $(,)?) => {
        $(
            impl Widen for $primitive {
                type Object = Boxed<$primitive>;

                #[inline]
                fn widen(self) -> Self::Object {
                    Boxed(self)
                }

                #[inline]
                fn narrow(object: Self::Object) -> Self {
                    object.0
                }
            }
        )+
    };
}

macro_rules! exact_identity {
    ($($primitive:ty),+ $(,)?) => {
        $(
            impl PartialEq for Boxed<$primitive> {
                #[inline]
                fn eq(&self, other: &Self) -> bool {
                    self.0 == other.0
                }
            }

            impl Eq for Boxed<$primitive> {}

            impl Hash for Boxed<$primitive> {
                #[inline]
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.0.hash(state);
                }
            }
        )+
    };
}

macro_rules! bitwise_identity {
    ($($float:ty),+ $(,)?) => {
        $(
            impl Boxed<$float> {
                #[inline]
                fn canonical_bits(&self) -> <$float as FloatBits>::Bits {
                    if self.0.is_nan() {
                        <$float>::NAN.to_bits()
                    } else {
                        self.0.to_bits()
                    }
                }
            }

            impl PartialEq for Boxed<$float> {
                #[inline]
                fn eq(&self, other: &Self) -> bool {
                    self.canonical_bits() == other.canonical_bits()
                }
            }

            impl Eq for Boxed<$float> {}

            impl Hash for Boxed<$float> {
                #[inline]
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.canonical_bits().hash(state);
                }
            }
        )+
    };
}

trait FloatBits {
    type Bits;
}

impl FloatBits for f32 {
    type Bits = u32;
}

impl FloatBits for f64 {
    type Bits = u64;
}

widen_primitive!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
exact_identity!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
bitwise_identity!(f32, f64);

/// Declares types as object types: they widen to themselves under `boxed()`.
///
/// # Examples
///
/// ```rust
/// use fnwrap::function::Function;
/// use fnwrap::widen_as_object;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct UserId(u64);
///
/// widen_as_object!(UserId);
///
/// let describe = Function::binary(|id: UserId, visits: u32| format!("{}:{visits}", id.0));
/// let boxed = describe.boxed();
/// assert_eq!(boxed.apply(UserId(7), 3.into()), "7:3");
/// ```
#[macro_export]
macro_rules! widen_as_object {
    ($($object:ty),+ $(,)?) => {
        $(
            impl $crate::boxing::Widen for $object {
                type Object = Self;

                #[inline]
                fn widen(self) -> Self {
                    self
                }

                #[inline]
                fn narrow(object: Self) -> Self {
                    object
                }
            }
        )+
    };
}

widen_as_object!(String, &'static str, ());

macro_rules! widen_generic_object {
    ($($object:ident),+ $(,)?) => {
        $(
            impl<T> Widen for $object<T> {
                type Object = Self;

                #[inline]
                fn widen(self) -> Self {
                    self
                }

                #[inline]
                fn narrow(object: Self) -> Self {
                    object
                }
            }
        )+
    };
}

widen_generic_object!(Boxed, Vec, Option, Box, Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_nan_values_are_equal_and_hash_alike() {
        let quiet = Boxed::new(f64::NAN);
        let negative = Boxed::new(-f64::NAN);
        assert_eq!(quiet, negative);
        assert_eq!(hash_of(&quiet), hash_of(&negative));
    }

    #[test]
    fn test_signed_zeros_are_distinct() {
        assert_ne!(Boxed::new(0.0_f32), Boxed::new(-0.0_f32));
        assert_ne!(Boxed::new(0.0_f64), Boxed::new(-0.0_f64));
    }

    #[test]
    fn test_integers_compare_by_value() {
        assert_eq!(Boxed::new(42_u16), Boxed::from(42_u16));
        assert_ne!(Boxed::new('a'), Boxed::new('b'));
    }

    #[test]
    fn test_widen_then_narrow_returns_original() {
        assert_eq!(f64::narrow(2.5_f64.widen()), 2.5);
        assert_eq!(String::narrow("text".to_string().widen()), "text");
    }

    #[test]
    fn test_display_forwards_to_inner_value() {
        assert_eq!(Boxed::new(1.25).to_string(), "1.25");
    }
}
