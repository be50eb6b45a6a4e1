//! Testing utilities for retry-driven code.
//!
//! Exercising retry behavior needs operations that fail on cue. This module
//! provides two such operations plus property-based testing support for
//! policies, all usable from this crate's tests and from downstream crates
//! testing their own retry wiring.
//!
//! # Examples
//!
//! ```
//! use steadfast::testing::Flaky;
//! use steadfast::{Operation, Retrier, RetryPolicy};
//!
//! # tokio_test::block_on(async {
//! let operation = Flaky::new(2, "recovered", "transient");
//! let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(3))
//!     .unwrap()
//!     .wrap(operation);
//!
//! assert_eq!(wrapped.call().await.unwrap(), "recovered");
//! assert_eq!(wrapped.operation().calls(), 3);
//! # });
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use crate::operation::Operation;

/// An operation that fails a fixed number of times, then succeeds forever.
///
/// The first `failures` calls return clones of `error`; every call after
/// that returns a clone of `value`. Calls are counted across the whole
/// lifetime of the value, so a wrapped `Flaky` observes attempts from
/// successive and concurrent retry runs alike.
#[derive(Debug)]
pub struct Flaky<T, E> {
    failures: u32,
    calls: AtomicU32,
    value: T,
    error: E,
}

impl<T, E> Flaky<T, E> {
    /// An operation that fails `failures` times before yielding `value`.
    pub fn new(failures: u32, value: T, error: E) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
            value,
            error,
        }
    }

    /// How many times the operation has been called so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T, E> Operation for Flaky<T, E>
where
    T: Clone + Send + Sync,
    E: Clone + Send + Sync,
{
    type Output = T;
    type Error = E;

    async fn call(&self) -> Result<T, E> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            Err(self.error.clone())
        } else {
            Ok(self.value.clone())
        }
    }
}

/// An operation that never succeeds.
///
/// Every call returns a clone of the same error, and calls are counted.
/// Useful for asserting exhaustion behavior: a budget of `n` retries
/// against an `AlwaysFail` must produce exactly `n + 1` calls.
#[derive(Debug)]
pub struct AlwaysFail<E> {
    calls: AtomicU32,
    error: E,
}

impl<E> AlwaysFail<E> {
    /// An operation that fails with `error` on every call.
    pub fn new(error: E) -> Self {
        Self {
            calls: AtomicU32::new(0),
            error,
        }
    }

    /// How many times the operation has been called so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E> Operation for AlwaysFail<E>
where
    E: Clone + Send + Sync,
{
    type Output = ();
    type Error = E;

    async fn call(&self) -> Result<(), E> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use std::time::Duration;

    use proptest::prelude::*;

    use crate::policy::RetryPolicy;

    impl Arbitrary for RetryPolicy {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        /// Valid policies only: a budget of up to five retries, with
        /// either no delay or a short fixed one.
        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            (0u32..6, proptest::option::of(0u64..3))
                .prop_map(|(max_retries, delay_ms)| {
                    let policy = RetryPolicy::new().with_max_retries(max_retries);
                    match delay_ms {
                        Some(ms) => policy.with_delay(Duration::from_millis(ms)),
                        None => policy,
                    }
                })
                .boxed()
        }
    }
}

#[cfg(test)]
mod testing_tests {
    use super::*;
    use crate::policy::RetryPolicy;
    use crate::retrier::Retrier;

    #[tokio::test]
    async fn test_flaky_fails_then_succeeds() {
        let operation = Flaky::new(2, "up", "down");
        assert_eq!(operation.call().await, Err("down"));
        assert_eq!(operation.call().await, Err("down"));
        assert_eq!(operation.call().await, Ok("up"));
        assert_eq!(operation.call().await, Ok("up"));
        assert_eq!(operation.calls(), 4);
    }

    #[tokio::test]
    async fn test_flaky_with_zero_failures_succeeds_immediately() {
        let operation = Flaky::new(0, 9, "unused");
        assert_eq!(operation.call().await, Ok(9));
        assert_eq!(operation.calls(), 1);
    }

    #[tokio::test]
    async fn test_always_fail_never_succeeds() {
        let operation = AlwaysFail::new("broken");
        assert_eq!(operation.call().await, Err("broken"));
        assert_eq!(operation.call().await, Err("broken"));
        assert_eq!(operation.calls(), 2);
    }

    #[tokio::test]
    async fn test_flaky_counts_calls_through_a_wrapper() {
        let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(4))
            .unwrap()
            .wrap(Flaky::new(1, (), "flap"));

        wrapped.call().await.unwrap();
        assert_eq!(wrapped.operation().calls(), 2);
    }

    #[cfg(feature = "proptest")]
    mod arbitrary_tests {
        use proptest::prelude::*;

        use crate::policy::RetryPolicy;
        use crate::retrier::Retrier;

        proptest! {
            #[test]
            fn prop_generated_policies_always_bind(policy: RetryPolicy) {
                prop_assert!(policy.validate().is_ok());
                prop_assert!(Retrier::new(policy).is_ok());
            }
        }
    }
}
