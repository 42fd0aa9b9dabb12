//! Arity-specific operations, generated once per argument tuple shape.
//!
//! Each invocation of `impl_function_arity!` implements [`Arguments`] for a
//! tuple and adds the spread-argument methods to [`Function`] over that
//! tuple: construction, `apply`, `compose`, `tupled`, `boxed` and `into_fn`.

use std::sync::Arc;

use super::{Function, InvalidArgumentError};
use crate::boxing::Widen;

/// An argument tuple with a statically known arity.
///
/// Implemented for `(A,)`, `(A, B)` and `(A, B, C)`.
///
/// # Examples
///
/// ```rust
/// use fnwrap::function::Arguments;
///
/// assert_eq!(<(u8,) as Arguments>::ARITY, 1);
/// assert_eq!(<(u8, String, f64) as Arguments>::ARITY, 3);
/// ```
pub trait Arguments {
    /// The number of elements in the tuple.
    const ARITY: usize;
}

macro_rules! impl_function_arity {
    ($arity:literal, $constructor:ident => $($position:ident: $argument:ident),+) => {
        paste::paste! {
            impl<$($argument),+> Arguments for ($($argument,)+) {
                const ARITY: usize = $arity;
            }

            impl<$($argument: 'static,)+ R: 'static> Function<($($argument,)+), R> {
                #[doc = "Wraps a callable taking " $arity " argument(s)."]
                pub fn $constructor<F>(function: F) -> Self
                where
                    F: Fn($($argument),+) -> R + Send + Sync + 'static,
                {
                    Self::from_tupled(move |($($position,)+)| function($($position),+))
                }

                #[doc = "Like [`Function::" $constructor "`], for a callable that may be absent."]
                ///
                /// # Errors
                ///
                /// Returns [`InvalidArgumentError`] if `function` is `None`.
                pub fn [<try_ $constructor>]<F>(function: Option<F>) -> Result<Self, InvalidArgumentError>
                where
                    F: Fn($($argument),+) -> R + Send + Sync + 'static,
                {
                    function.map(Self::$constructor).ok_or(InvalidArgumentError::absent(
                        concat!("Function::try_", stringify!($constructor)),
                        "function",
                    ))
                }

                /// Invokes the function with spread arguments.
                #[inline]
                pub fn apply(&self, $($position: $argument),+) -> R {
                    self.call(($($position,)+))
                }

                /// Returns a function that transforms each argument before calling this one.
                ///
                /// There is one `before` function per argument position. The
                /// returned function takes the `before` functions' input types.
                pub fn compose<$([<$argument Source>], [<$argument Before>]),+>(
                    &self,
                    $([<before_ $position>]: [<$argument Before>]),+
                ) -> Function<($([<$argument Source>],)+), R>
                where
                    $(
                        [<$argument Source>]: 'static,
                        [<$argument Before>]: Fn([<$argument Source>]) -> $argument + Send + Sync + 'static,
                    )+
                {
                    let body = Arc::clone(&self.body);
                    Function::from_tupled(move |($($position,)+)| {
                        body(($([<before_ $position>]($position),)+))
                    })
                }

                /// Like `compose`, for `before` functions that may be absent.
                ///
                /// # Errors
                ///
                /// Returns [`InvalidArgumentError`] naming the first absent
                /// `before` function.
                pub fn try_compose<$([<$argument Source>], [<$argument Before>]),+>(
                    &self,
                    $([<before_ $position>]: Option<[<$argument Before>]>),+
                ) -> Result<Function<($([<$argument Source>],)+), R>, InvalidArgumentError>
                where
                    $(
                        [<$argument Source>]: 'static,
                        [<$argument Before>]: Fn([<$argument Source>]) -> $argument + Send + Sync + 'static,
                    )+
                {
                    $(
                        let [<before_ $position>] = [<before_ $position>].ok_or(
                            InvalidArgumentError::absent(
                                "Function::try_compose",
                                stringify!([<before_ $position>]),
                            ),
                        )?;
                    )+
                    Ok(self.compose($([<before_ $position>]),+))
                }

                /// Returns a function of one argument taking all arguments as a single tuple.
                pub fn tupled(&self) -> Function<(($($argument,)+),), R> {
                    let body = Arc::clone(&self.body);
                    Function::from_tupled(move |(arguments,)| body(arguments))
                }

                /// Returns a function whose arguments are widened to their object form.
                ///
                /// Primitive positions become [`Boxed`](crate::boxing::Boxed)
                /// values, which are hashable even for floats. Other types are
                /// unchanged. Results are identical to this function's.
                pub fn boxed(&self) -> Function<($(<$argument as Widen>::Object,)+), R>
                where
                    $(
                        $argument: Widen,
                        <$argument as Widen>::Object: 'static,
                    )+
                {
                    let body = Arc::clone(&self.body);
                    Function::from_tupled(move |($($position,)+)| {
                        body(($(<$argument as Widen>::narrow($position),)+))
                    })
                }

                /// Converts the wrapper into a plain closure with spread arguments.
                pub fn into_fn(self) -> impl Fn($($argument),+) -> R + Send + Sync + 'static {
                    move |$($position),+| self.call(($($position,)+))
                }
            }
        }
    };
}

impl_function_arity!(1, unary => first: A);
impl_function_arity!(2, binary => first: A, second: B);
impl_function_arity!(3, ternary => first: A, second: B, third: C);

impl<A, B, C, R> Function<(A, B, C), R>
where
    A: 'static,
    B: 'static,
    C: 'static,
    R: 'static,
{
    /// Returns a function of two arguments whose first argument aggregates
    /// the leading pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    ///
    /// let scale = Function::ternary(|x: f64, y: f64, factor: f64| (x * factor, y * factor));
    /// let scale_point = scale.tupled_leading();
    /// assert_eq!(scale_point.apply((1.0, 2.0), 3.0), (3.0, 6.0));
    /// ```
    pub fn tupled_leading(&self) -> Function<((A, B), C), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |((first, second), third)| body((first, second, third)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_matches_tuple_length() {
        assert_eq!(Function::unary(|value: u8| value).arity(), 1);
        assert_eq!(Function::binary(|left: u8, _: u8| left).arity(), 2);
        assert_eq!(Function::ternary(|left: u8, _: u8, _: u8| left).arity(), 3);
    }

    #[test]
    fn test_tupled_reduces_arity_to_one() {
        let join = Function::ternary(|a: char, b: char, c: char| format!("{a}{b}{c}"));
        let tupled = join.tupled();
        assert_eq!(tupled.arity(), 1);
        assert_eq!(tupled.apply(('x', 'y', 'z')), "xyz");
    }

    #[test]
    fn test_try_constructor_names_the_operation() {
        let missing: Option<fn(i32, i32) -> i32> = None;
        let error = Function::try_binary(missing).unwrap_err();
        assert_eq!(error.operation, "Function::try_binary");
        assert_eq!(error.parameter, "function");
    }

    #[test]
    fn test_into_fn_behaves_like_apply() {
        let subtract = Function::binary(|left: i32, right: i32| left - right);
        let plain = subtract.clone().into_fn();
        assert_eq!(plain(10, 3), subtract.apply(10, 3));
    }
}
