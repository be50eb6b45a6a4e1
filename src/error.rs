//! Error types for policy validation and exhausted retries.

use std::fmt;
use std::sync::Arc;

use crate::nonempty::NonEmptyVec;
use crate::policy::RetryPolicy;

/// Error returned when a retry policy cannot be bound to an operation.
///
/// Raised synchronously by [`Retrier::new`](crate::Retrier::new), as a
/// plain `Result` rather than through a wrapped future: a misconfigured
/// policy is a programming defect and surfaces before any attempt is made.
///
/// # Examples
///
/// ```
/// use steadfast::{PolicyError, Retrier, RetryPolicy};
///
/// let err = Retrier::new(RetryPolicy::new()).unwrap_err();
/// assert_eq!(err, PolicyError::MissingMaxRetries);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// The policy never set a retry budget.
    MissingMaxRetries,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::MissingMaxRetries => {
                write!(f, "retry policy is missing max_retries")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Error returned when every allowed attempt has failed.
///
/// Created once per invocation of a wrapped operation, after
/// `max_retries + 1` consecutive failures. It carries the policy that
/// governed the attempts, a handle to the operation that produced them,
/// and the full trail of failures in chronological order. Nothing is
/// discarded or summarized; the trail always has exactly
/// `max_retries + 1` entries.
///
/// # Examples
///
/// ```
/// use steadfast::{Operation, Retrier, RetryPolicy};
///
/// # tokio_test::block_on(async {
/// let retrier = Retrier::new(RetryPolicy::new().with_max_retries(2)).unwrap();
/// let wrapped = retrier.wrap(|| async { Err::<(), _>("boom") });
///
/// let exhausted = wrapped.call().await.unwrap_err();
/// assert_eq!(exhausted.attempts(), 3); // 1 initial + 2 retries
/// assert_eq!(exhausted.errors.into_vec(), vec!["boom"; 3]);
/// # });
/// ```
pub struct RetryExhausted<E, Op> {
    /// The policy that governed the failed attempts.
    pub policy: RetryPolicy,
    /// The operation that was retried. Pointer-equal to the handle held by
    /// the wrapped operation that produced this error, so callers can
    /// assert which operation exhausted via [`Arc::ptr_eq`].
    pub operation: Arc<Op>,
    /// Every failure in chronological order, oldest first.
    pub errors: NonEmptyVec<E>,
}

impl<E, Op> RetryExhausted<E, Op> {
    /// Create a new exhaustion error.
    pub fn new(policy: RetryPolicy, operation: Arc<Op>, errors: NonEmptyVec<E>) -> Self {
        Self {
            policy,
            operation,
            errors,
        }
    }

    /// Total number of attempts made (initial + retries).
    ///
    /// Exactly the trail length, so it stays accurate even for budgets at
    /// the top of the `u32` range.
    pub fn attempts(&self) -> usize {
        self.errors.len()
    }

    /// The failure from the first attempt.
    pub fn first_error(&self) -> &E {
        self.errors.head()
    }

    /// The failure from the final attempt.
    pub fn last_error(&self) -> &E {
        self.errors.last()
    }

    /// Consume the error, keeping only the trail.
    pub fn into_errors(self) -> NonEmptyVec<E> {
        self.errors
    }
}

impl<E: Clone, Op> Clone for RetryExhausted<E, Op> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            operation: Arc::clone(&self.operation),
            errors: self.errors.clone(),
        }
    }
}

impl<E: fmt::Debug, Op> fmt::Debug for RetryExhausted<E, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExhausted")
            .field("policy", &self.policy)
            .field("operation", &"<operation>")
            .field("errors", &self.errors)
            .finish()
    }
}

impl<E: fmt::Display, Op> fmt::Display for RetryExhausted<E, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maximum retries reached after {} attempts: {}",
            self.attempts(),
            self.last_error()
        )
    }
}

impl<E: std::error::Error + 'static, Op> std::error::Error for RetryExhausted<E, Op> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.last_error())
    }
}
