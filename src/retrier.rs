//! Binding policies to operations and driving the attempts.

use std::fmt;
use std::sync::Arc;

use crate::error::{PolicyError, RetryExhausted};
use crate::nonempty::NonEmptyVec;
use crate::operation::Operation;
use crate::policy::RetryPolicy;

/// A validated policy, ready to wrap operations.
///
/// Construction is where misconfiguration surfaces: [`Retrier::new`]
/// checks the policy once, synchronously, and wrapping performs no further
/// validation. One retrier can wrap any number of operations.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use steadfast::{Operation, Retrier, RetryPolicy};
///
/// # tokio_test::block_on(async {
/// let retrier = Retrier::new(
///     RetryPolicy::new()
///         .with_max_retries(2)
///         .with_delay(Duration::from_millis(1)),
/// )
/// .unwrap();
///
/// let wrapped = retrier.wrap(|| async { Ok::<_, String>(7) });
/// assert_eq!(wrapped.call().await.unwrap(), 7);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Retrier {
    policy: RetryPolicy,
    limit: u32,
}

impl Retrier {
    /// Bind a policy, validating it.
    ///
    /// Fails with [`PolicyError::MissingMaxRetries`] when the policy never
    /// set a retry budget. The error is returned directly, never through a
    /// wrapped future, so misconfiguration cannot masquerade as an
    /// operation failure.
    pub fn new(policy: RetryPolicy) -> Result<Self, PolicyError> {
        let limit = policy.max_retries().ok_or(PolicyError::MissingMaxRetries)?;
        Ok(Self { policy, limit })
    }

    /// The bound policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Wrap an operation.
    ///
    /// The operation is not validated or invoked here; it runs lazily,
    /// once per [`call`](Operation::call) of the returned [`Retry`].
    pub fn wrap<Op: Operation>(&self, operation: Op) -> Retry<Op> {
        Retry {
            policy: self.policy.clone(),
            limit: self.limit,
            operation: Arc::new(operation),
        }
    }
}

/// Wrap `operation` with `policy` in one step.
///
/// Equivalent to `Retrier::new(policy)?.wrap(operation)`.
///
/// # Examples
///
/// ```
/// use steadfast::{retry, Operation, RetryPolicy};
///
/// # tokio_test::block_on(async {
/// let wrapped = retry(RetryPolicy::new().with_max_retries(1), || async {
///     Ok::<_, String>("fine")
/// })
/// .unwrap();
/// assert_eq!(wrapped.call().await.unwrap(), "fine");
/// # });
/// ```
pub fn retry<Op: Operation>(
    policy: RetryPolicy,
    operation: Op,
) -> Result<Retry<Op>, PolicyError> {
    Ok(Retrier::new(policy)?.wrap(operation))
}

/// An operation wrapped with a retry policy.
///
/// `Retry` is itself an [`Operation`]: it resolves with the wrapped
/// operation's success type and fails with [`RetryExhausted`]. Wrapping a
/// `Retry` in another retrier therefore layers policies, the outer
/// executor treating the whole inner retry sequence as one opaque attempt.
///
/// Every [`call`](Operation::call) is independent: it starts with zero
/// failures, drives attempts strictly sequentially, and drops its attempt
/// state when it settles.
pub struct Retry<Op> {
    policy: RetryPolicy,
    limit: u32,
    operation: Arc<Op>,
}

impl<Op> Retry<Op> {
    /// The policy governing this wrapped operation.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The shared handle to the wrapped operation.
    ///
    /// Pointer-equal to [`RetryExhausted::operation`] in any exhaustion
    /// error this wrapped operation produces.
    pub fn operation(&self) -> &Arc<Op> {
        &self.operation
    }
}

impl<Op> Clone for Retry<Op> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            limit: self.limit,
            operation: Arc::clone(&self.operation),
        }
    }
}

impl<Op> fmt::Debug for Retry<Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("policy", &self.policy)
            .field("operation", &"<operation>")
            .finish()
    }
}

impl<Op: Operation> Operation for Retry<Op> {
    type Output = Op::Output;
    type Error = RetryExhausted<Op::Error, Op>;

    async fn call(&self) -> Result<Self::Output, Self::Error> {
        let mut trail = match self.operation.call().await {
            Ok(value) => return Ok(value),
            Err(error) => NonEmptyVec::singleton(error),
        };

        loop {
            let failures = trail.len();
            if failures > self.limit as usize {
                #[cfg(feature = "tracing")]
                tracing::warn!(attempts = failures, "retries exhausted");
                return Err(RetryExhausted::new(
                    self.policy.clone(),
                    Arc::clone(&self.operation),
                    trail,
                ));
            }

            // Bounded by the u32 budget above, so the cast is exact.
            let delay = self.policy.delay().before_retry(failures as u32);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt = failures,
                delay_ms = delay.as_millis() as u64,
                "attempt failed, will retry"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.operation.call().await {
                Ok(value) => return Ok(value),
                Err(error) => trail.push(error),
            }
        }
    }
}
