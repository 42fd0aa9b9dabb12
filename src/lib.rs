//! # fnwrap
//!
//! Typed, composable and memoizable function wrappers for Rust.
//!
//! ## Overview
//!
//! A [`Function<Args, R>`](function::Function) wraps a callable over an argument
//! tuple `Args` (arity 1 to 3) and returns `R`. One generic type covers every
//! mix of argument types, so there is no family of per-signature interfaces:
//!
//! - **Invocation**: `apply(a, b)` with spread arguments or `call((a, b))` with a tuple
//! - **Composition**: `compose` transforms each argument first, `and_then` transforms the result,
//!   `consume` feeds the result to a sink
//! - **Memoization**: `memoized` caches results per argument tuple, computing each key at most once
//!   even under concurrent callers
//! - **Adaptation**: `tupled` aggregates arguments, `boxed` widens primitives to hashable
//!   [`Boxed`](boxing::Boxed) values
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`MemoConfig`](memoize::MemoConfig)
//! - `fxhash`: hash memoization tables with `rustc-hash`
//! - `ahash`: hash memoization tables with `ahash`
//! - `full`: Enable all optional features except the hasher selection
//!
//! ## Example
//!
//! ```rust
//! use fnwrap::prelude::*;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let multiply = Function::binary(move |left: i64, right: i64| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     left * right
//! });
//!
//! let memoized = multiply.memoized();
//! assert_eq!(memoized.apply(3, 4), 12);
//! assert_eq!(memoized.apply(3, 4), 12);
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//!
//! let described = memoized.and_then(|product| format!("product={product}"));
//! assert_eq!(described.apply(3, 4), "product=12");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use fnwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::boxing::{Boxed, Widen};
    pub use crate::function::{Arguments, Consumer, Function, InvalidArgumentError};
    pub use crate::memoize::{LockStrategy, MemoConfig};
}

pub mod boxing;
pub mod function;
pub mod memoize;
