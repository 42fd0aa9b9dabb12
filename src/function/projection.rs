//! Lifting unary functions into wider arities that use a single position.

use std::sync::Arc;

use super::Function;

impl<A, R> Function<(A,), R>
where
    A: 'static,
    R: 'static,
{
    /// Returns a binary function that uses only its first argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    ///
    /// let length = Function::unary(|text: &'static str| text.len());
    /// let first_only = length.as_first_of_two::<bool>();
    /// assert_eq!(first_only.apply("four", true), 4);
    /// ```
    pub fn as_first_of_two<B: 'static>(&self) -> Function<(A, B), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |(first, _)| body((first,)))
    }

    /// Returns a binary function that uses only its second argument.
    pub fn as_second_of_two<X: 'static>(&self) -> Function<(X, A), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |(_, second)| body((second,)))
    }

    /// Returns a ternary function that uses only its first argument.
    pub fn as_first_of_three<B: 'static, C: 'static>(&self) -> Function<(A, B, C), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |(first, _, _)| body((first,)))
    }

    /// Returns a ternary function that uses only its second argument.
    pub fn as_second_of_three<X: 'static, C: 'static>(&self) -> Function<(X, A, C), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |(_, second, _)| body((second,)))
    }

    /// Returns a ternary function that uses only its third argument.
    pub fn as_third_of_three<X: 'static, Y: 'static>(&self) -> Function<(X, Y, A), R> {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |(_, _, third)| body((third,)))
    }
}
