//! Argument-keyed memoization.
//!
//! This module holds the caches behind
//! [`Function::memoized`](crate::function::Function::memoized) and the
//! [`MemoConfig`] that tunes them.
//!
//! # Guarantees
//!
//! - A key is computed at most once while it stays cached, even when many
//!   threads call the memoized function with that key at the same time.
//! - A failed computation (an `Err` from a fallible function, or a panic)
//!   stores nothing. The next call with the same key computes again.
//! - Results are cloned out of the cache, so `Option` and `Result` values
//!   are cached like any other value: a computed `None` is a hit.
//!
//! # Lock Strategies
//!
//! | Strategy                  | Blocks callers of                 | Re-entrant calls     |
//! |---------------------------|-----------------------------------|----------------------|
//! | [`LockStrategy::Global`]  | the whole function                | deadlock             |
//! | [`LockStrategy::Striped`] | the same key                      | deadlock on same key |
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::function::Function;
//! use fnwrap::memoize::MemoConfig;
//!
//! let length = Function::unary(|text: String| text.len());
//! let memoized = length.memoized_with(MemoConfig::global());
//!
//! assert_eq!(memoized.apply("hello".to_string()), 5);
//! assert_eq!(memoized.cached_len(), Some(1));
//! ```

mod cache;
mod config;
mod table;

pub(crate) use cache::{CacheHandle, MemoCache};
pub use config::{LockStrategy, MemoConfig};
