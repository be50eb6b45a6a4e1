//! The capability every retryable unit of work satisfies.
//!
//! An [`Operation`] is niladic and future-returning: call it with no
//! arguments, get back a future of a result. Closures returning futures
//! satisfy it automatically, and so does [`Retry`](crate::Retry), which is
//! what lets retriers nest without special cases.

use std::future::Future;

use crate::error::PolicyError;
use crate::policy::RetryPolicy;
use crate::retrier::{Retrier, Retry};

/// An asynchronous, re-invokable unit of work.
///
/// The executor never inspects an operation's success or error values; it
/// only awaits the former and collects the latter. `call` borrows rather
/// than consumes, so one operation can be invoked repeatedly (retries) and
/// concurrently (independent calls of the same wrapped operation).
///
/// Any `Fn` closure returning a future of a `Result` is an `Operation`:
///
/// ```
/// use steadfast::Operation;
///
/// # tokio_test::block_on(async {
/// let op = || async { Ok::<_, String>(42) };
/// assert_eq!(op.call().await, Ok(42));
/// # });
/// ```
pub trait Operation: Send + Sync {
    /// The success value the operation resolves with.
    type Output: Send;

    /// The failure value the operation fails with. Opaque to the executor.
    type Error: Send;

    /// Invoke the operation once.
    fn call(&self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

impl<F, Fut, T, E> Operation for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Send,
{
    type Output = T;
    type Error = E;

    fn call(&self) -> impl Future<Output = Result<T, E>> + Send {
        self()
    }
}

/// Fluent extension for anything implementing [`Operation`].
///
/// # Examples
///
/// ```
/// use steadfast::prelude::*;
///
/// # tokio_test::block_on(async {
/// let wrapped = (|| async { Ok::<_, String>("done") })
///     .with_retries(RetryPolicy::new().with_max_retries(2))
///     .unwrap();
/// assert_eq!(wrapped.call().await.unwrap(), "done");
/// # });
/// ```
pub trait OperationExt: Operation {
    /// Wrap this operation with a retry policy.
    ///
    /// Fails synchronously with [`PolicyError`] when the policy is
    /// invalid, before the operation is ever invoked.
    fn with_retries(self, policy: RetryPolicy) -> Result<Retry<Self>, PolicyError>
    where
        Self: Sized,
    {
        Ok(Retrier::new(policy)?.wrap(self))
    }
}

impl<Op: Operation> OperationExt for Op {}
