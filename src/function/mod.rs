//! Typed function wrappers.
//!
//! [`Function<Args, R>`] wraps a callable over the argument tuple `Args` and
//! produces `R`. A single generic type stands in for every signature: the
//! argument tuple may mix any types, and per-arity methods (`apply`,
//! `compose`, `tupled`, `boxed`, ...) are available for tuples of one to
//! three elements.
//!
//! # Overview
//!
//! - Construction: [`Function::unary`], [`Function::binary`],
//!   [`Function::ternary`], [`Function::from_tupled`], [`Function::constant`]
//! - Invocation: `apply(a, b, ..)` or [`Function::call`] with a tuple
//! - Composition: `compose` (per argument), [`Function::and_then`] (result),
//!   [`Function::consume`] (result into a sink)
//! - Memoization: [`Function::memoized`], [`Function::try_memoized`]
//! - Adaptation: `tupled`, `boxed`, `into_fn`
//!
//! Every combinator returns a new wrapper sharing the original callable; the
//! original is never modified. Wrappers are cheap to clone and are
//! `Send + Sync`.
//!
//! # Laws
//!
//! - **Compose**: `w.compose(f, g).apply(x, y) == w.apply(f(x), g(y))`
//! - **And then**: `w.and_then(h).apply(x, y) == h(w.apply(x, y))`
//! - **Memoize**: `w.memoized().apply(x, y) == w.apply(x, y)`
//! - **Idempotent memoize**: `m.memoized().ptr_eq(&m)` for a memoized `m`
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::function::Function;
//!
//! let area = Function::binary(|width: u32, height: u32| width * height);
//! let from_text = area.compose(
//!     |width: &str| width.parse::<u32>().unwrap_or(0),
//!     |height: &str| height.parse::<u32>().unwrap_or(0),
//! );
//!
//! assert_eq!(from_text.apply("3", "4"), 12);
//! assert_eq!(from_text.arity(), 2);
//! ```

mod arity;
mod error;
mod projection;

pub use arity::Arguments;
pub use error::InvalidArgumentError;

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::memoize::{CacheHandle, MemoCache, MemoConfig};

type Body<Args, R> = Arc<dyn Fn(Args) -> R + Send + Sync>;

/// A shared, immutable callable from the argument tuple `Args` to `R`.
///
/// # Type Parameters
///
/// * `Args` - The argument tuple, such as `(A,)`, `(A, B)` or `(A, B, C)`
/// * `R` - The result type
///
/// # Examples
///
/// ```rust
/// use fnwrap::function::Function;
///
/// let greet = Function::unary(|name: &'static str| format!("hello, {name}"));
/// assert_eq!(greet.apply("world"), "hello, world");
/// assert_eq!(greet.call(("tuple",)), "hello, tuple");
/// ```
pub struct Function<Args, R> {
    body: Body<Args, R>,
    cache: Option<Arc<dyn CacheHandle>>,
}

/// A function wrapper that produces no value, as returned by [`Function::consume`].
pub type Consumer<Args> = Function<Args, ()>;

impl<Args, R> Clone for Function<Args, R> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            cache: self.cache.clone(),
        }
    }
}

impl<Args: Arguments, R> fmt::Debug for Function<Args, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("arity", &Args::ARITY)
            .field("memoized", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl<Args, R> Function<Args, R>
where
    Args: Arguments + 'static,
    R: 'static,
{
    /// Wraps a callable that takes the whole argument tuple.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    ///
    /// let sum = Function::from_tupled(|(left, right): (i32, i32)| left + right);
    /// assert_eq!(sum.apply(2, 3), 5);
    /// ```
    pub fn from_tupled<F>(function: F) -> Self
    where
        F: Fn(Args) -> R + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(function),
            cache: None,
        }
    }

    /// Like [`Function::from_tupled`], for a callable that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `function` is `None`.
    pub fn try_from_tupled<F>(function: Option<F>) -> Result<Self, InvalidArgumentError>
    where
        F: Fn(Args) -> R + Send + Sync + 'static,
    {
        function
            .map(Self::from_tupled)
            .ok_or(InvalidArgumentError::absent("Function::try_from_tupled", "function"))
    }

    /// Invokes the function with an argument tuple.
    #[inline]
    pub fn call(&self, arguments: Args) -> R {
        (self.body)(arguments)
    }

    /// Returns the number of arguments the function takes.
    #[inline]
    pub fn arity(&self) -> usize {
        Args::ARITY
    }

    /// Returns `true` if this wrapper caches its results.
    #[inline]
    pub fn is_memoized(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns `true` if both wrappers share the same underlying callable.
    ///
    /// Clones are pointer-equal; wrappers built by combinators are not.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    /// Returns a function that applies `after` to this function's result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    ///
    /// let add = Function::binary(|left: i32, right: i32| left + right);
    /// let describe = add.and_then(|sum| format!("sum is {sum}"));
    /// assert_eq!(describe.apply(1, 2), "sum is 3");
    /// ```
    pub fn and_then<S, G>(&self, after: G) -> Function<Args, S>
    where
        S: 'static,
        G: Fn(R) -> S + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        Function::from_tupled(move |arguments| after(body(arguments)))
    }

    /// Like [`Function::and_then`], for an `after` function that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `after` is `None`.
    pub fn try_and_then<S, G>(&self, after: Option<G>) -> Result<Function<Args, S>, InvalidArgumentError>
    where
        S: 'static,
        G: Fn(R) -> S + Send + Sync + 'static,
    {
        let after = after.ok_or(InvalidArgumentError::absent("Function::try_and_then", "after"))?;
        Ok(self.and_then(after))
    }

    /// Returns a consumer that invokes this function and passes the result to `sink`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let recorder = Arc::clone(&seen);
    ///
    /// let double = Function::unary(|value: i32| value * 2);
    /// let record = double.consume(move |doubled| recorder.lock().unwrap().push(doubled));
    ///
    /// record.apply(4);
    /// record.apply(5);
    /// assert_eq!(*seen.lock().unwrap(), vec![8, 10]);
    /// ```
    pub fn consume<C>(&self, sink: C) -> Consumer<Args>
    where
        C: Fn(R) + Send + Sync + 'static,
    {
        self.and_then(sink)
    }

    /// Like [`Function::consume`], for a sink that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `sink` is `None`.
    pub fn try_consume<C>(&self, sink: Option<C>) -> Result<Consumer<Args>, InvalidArgumentError>
    where
        C: Fn(R) + Send + Sync + 'static,
    {
        let sink = sink.ok_or(InvalidArgumentError::absent("Function::try_consume", "sink"))?;
        Ok(self.consume(sink))
    }

    /// Returns the configuration of this wrapper's cache, if it is memoized.
    pub fn memo_config(&self) -> Option<MemoConfig> {
        self.cache.as_ref().map(|cache| cache.config())
    }

    /// Returns the number of cached results, if this wrapper is memoized.
    ///
    /// Keys that are mid-computation or whose computation failed are not
    /// counted.
    pub fn cached_len(&self) -> Option<usize> {
        self.cache.as_ref().map(|cache| cache.len())
    }
}

impl<Args, R> Function<Args, R>
where
    Args: Arguments + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Returns a function that ignores its arguments and always returns `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    ///
    /// let always: Function<(i32, &str), char> = Function::constant('x');
    /// assert_eq!(always.apply(1, "ignored"), 'x');
    /// ```
    pub fn constant(value: R) -> Self {
        Self::from_tupled(move |_| value.clone())
    }
}

impl<Args, R> Function<Args, R>
where
    Args: Arguments + Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Returns a function that caches results per argument tuple.
    ///
    /// Uses [`MemoConfig::default`]. If this wrapper is already memoized it is
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&calls);
    /// let square = Function::unary(move |value: u64| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    ///     value * value
    /// });
    ///
    /// let memoized = square.memoized();
    /// assert_eq!(memoized.apply(9), 81);
    /// assert_eq!(memoized.apply(9), 81);
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// assert!(memoized.memoized().ptr_eq(&memoized));
    /// ```
    pub fn memoized(&self) -> Self {
        self.memoized_with(MemoConfig::default())
    }

    /// Like [`Function::memoized`], with an explicit cache configuration.
    ///
    /// If this wrapper is already memoized it is returned unchanged and
    /// `config` is ignored.
    pub fn memoized_with(&self, config: MemoConfig) -> Self {
        if self.is_memoized() {
            tracing::debug!(arity = Args::ARITY, "function is already memoized");
            return self.clone();
        }

        let cache = Arc::new(MemoCache::<Args, R>::new(config));
        let store = Arc::clone(&cache);
        let body = Arc::clone(&self.body);
        let memoized = move |arguments: Args| {
            let cached: Result<R, Infallible> =
                store.get_or_try_compute(arguments, |arguments| Ok(body(arguments)));
            match cached {
                Ok(value) => value,
                Err(never) => match never {},
            }
        };

        Self {
            body: Arc::new(memoized),
            cache: Some(cache),
        }
    }
}

impl<Args, T, E> Function<Args, Result<T, E>>
where
    Args: Arguments + Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: 'static,
{
    /// Returns a function that caches successful results per argument tuple.
    ///
    /// Only `Ok` values are stored. An `Err` is returned to the caller as is,
    /// and the next call with the same arguments invokes the function again.
    /// If this wrapper is already memoized it is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::function::Function;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let attempts = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&attempts);
    /// let flaky = Function::unary(move |key: u8| {
    ///     if counter.fetch_add(1, Ordering::SeqCst) == 0 {
    ///         Err("unavailable")
    ///     } else {
    ///         Ok(u32::from(key) * 10)
    ///     }
    /// });
    ///
    /// let memoized = flaky.try_memoized();
    /// assert_eq!(memoized.apply(4), Err("unavailable"));
    /// assert_eq!(memoized.apply(4), Ok(40));
    /// assert_eq!(memoized.apply(4), Ok(40));
    /// assert_eq!(attempts.load(Ordering::SeqCst), 2);
    /// ```
    pub fn try_memoized(&self) -> Self {
        self.try_memoized_with(MemoConfig::default())
    }

    /// Like [`Function::try_memoized`], with an explicit cache configuration.
    pub fn try_memoized_with(&self, config: MemoConfig) -> Self {
        if self.is_memoized() {
            tracing::debug!(arity = Args::ARITY, "function is already memoized");
            return self.clone();
        }

        let cache = Arc::new(MemoCache::<Args, T>::new(config));
        let store = Arc::clone(&cache);
        let body = Arc::clone(&self.body);
        let memoized = move |arguments: Args| store.get_or_try_compute(arguments, |arguments| body(arguments));

        Self {
            body: Arc::new(memoized),
            cache: Some(cache),
        }
    }
}

static_assertions::assert_impl_all!(Function<(String, i64), Vec<u8>>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Consumer<(u8, u8, u8)>: Send, Sync, Clone);
