//! # Steadfast
//!
//! > *"Fall seven times, stand up eight"*
//!
//! A Rust library for policy-driven retries of async operations.
//!
//! ## Philosophy
//!
//! **Steadfast** keeps the three concerns of retrying separate:
//! - **Policies** are plain data (how many retries, how long to wait)
//! - **Operations** are opaque capabilities (anything async that can fail)
//! - **The executor** is one explicit loop (attempt, collect, wait, repeat)
//!
//! Errors are never inspected or classified. When the budget runs out, every
//! failure from every attempt comes back in order, so nothing about the
//! operation's history is lost.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::time::Duration;
//! use steadfast::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::new()
//!     .with_max_retries(3)
//!     .with_delay(Duration::from_millis(10));
//!
//! let fetch = Retrier::new(policy)
//!     .unwrap()
//!     .wrap(|| async { Err::<String, _>("connection refused") });
//!
//! match fetch.call().await {
//!     Ok(body) => println!("fetched: {}", body),
//!     Err(exhausted) => {
//!         // 1 initial attempt + 3 retries, every failure kept in order
//!         assert_eq!(exhausted.attempts(), 4);
//!         for error in exhausted.errors.iter() {
//!             assert_eq!(*error, "connection refused");
//!         }
//!     }
//! }
//! # });
//! ```
//!
//! Because a wrapped operation is itself an [`Operation`], retriers nest:
//! wrapping a [`Retry`] in another retrier layers budgets, the outer policy
//! counting each full inner retry sequence as a single attempt.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod nonempty;
pub mod operation;
pub mod policy;
pub mod retrier;
pub mod testing;

// Re-exports
pub use error::{PolicyError, RetryExhausted};
pub use nonempty::NonEmptyVec;
pub use operation::{Operation, OperationExt};
pub use policy::{Delay, RetryPolicy};
pub use retrier::{retry, Retrier, Retry};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PolicyError, RetryExhausted};
    pub use crate::nonempty::NonEmptyVec;
    pub use crate::operation::{Operation, OperationExt};
    pub use crate::policy::{Delay, RetryPolicy};
    pub use crate::retrier::{retry, Retrier, Retry};
}

