//! Error types for building function wrappers.

/// Represents an error when a required collaborator is absent.
///
/// Returned by the `try_*` constructors and combinators of
/// [`Function`](super::Function), which accept `Option` collaborators for
/// callers that receive them from dynamic sources. The check happens before
/// any wrapper is built, never during a call.
///
/// # Examples
///
/// ```rust
/// use fnwrap::function::{Function, InvalidArgumentError};
///
/// let missing: Option<fn(i32) -> i32> = None;
/// let error = Function::<(i32,), i32>::try_unary(missing).unwrap_err();
///
/// assert_eq!(
///     error,
///     InvalidArgumentError {
///         operation: "Function::try_unary",
///         parameter: "function",
///     }
/// );
/// assert_eq!(
///     format!("{error}"),
///     "Function::try_unary: required argument `function` is absent"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidArgumentError {
    /// The operation that rejected its arguments.
    pub operation: &'static str,
    /// The name of the absent parameter.
    pub parameter: &'static str,
}

impl InvalidArgumentError {
    pub(crate) const fn absent(operation: &'static str, parameter: &'static str) -> Self {
        Self {
            operation,
            parameter,
        }
    }
}

impl std::fmt::Display for InvalidArgumentError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: required argument `{}` is absent",
            self.operation, self.parameter
        )
    }
}

impl std::error::Error for InvalidArgumentError {}
