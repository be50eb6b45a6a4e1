//! Retry policies: how many retries, and how long to wait between them.
//!
//! A [`RetryPolicy`] is plain data built with chainable `with_*` methods.
//! The retry budget must be set explicitly; binding a policy that never set
//! one fails with [`PolicyError::MissingMaxRetries`] before any attempt is
//! made. The wait between attempts is a [`Delay`]: nothing, a fixed
//! duration, or a function of how many failures have occurred so far.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::PolicyError;

/// Wait strategy between a failed attempt and the next retry.
///
/// The computed variant receives the 1-based count of failures observed so
/// far: a function called with `1` is computing the wait before the first
/// retry. The executor never calls it with a value beyond the policy's
/// retry budget.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use steadfast::Delay;
///
/// assert_eq!(Delay::None.before_retry(1), Duration::ZERO);
/// assert_eq!(
///     Delay::Fixed(Duration::from_millis(50)).before_retry(3),
///     Duration::from_millis(50),
/// );
/// ```
#[derive(Clone, Default)]
pub enum Delay {
    /// No wait between attempts. The default when a policy never sets one.
    #[default]
    None,
    /// The same wait before every retry.
    Fixed(Duration),
    /// Wait computed from the 1-based count of failures so far.
    Computed(Arc<dyn Fn(u32) -> Duration + Send + Sync>),
}

impl Delay {
    /// Resolve the wait before retry number `failures` (1-based).
    pub fn before_retry(&self, failures: u32) -> Duration {
        match self {
            Delay::None => Duration::ZERO,
            Delay::Fixed(duration) => *duration,
            Delay::Computed(f) => f(failures),
        }
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delay::None => f.write_str("None"),
            Delay::Fixed(duration) => f.debug_tuple("Fixed").field(duration).finish(),
            Delay::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

/// Immutable retry configuration: how many retries, waiting how long.
///
/// `max_retries` counts *additional* attempts after the first, so a policy
/// with `max_retries = 2` allows three attempts in total. It has no
/// default: a policy that never set it fails [`validate`](Self::validate),
/// and a [`Retrier`](crate::Retrier) cannot be built from it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use steadfast::RetryPolicy;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(3)
///     .with_delay(Duration::from_millis(50));
/// assert_eq!(policy.max_retries(), Some(3));
/// assert!(policy.validate().is_ok());
/// ```
///
/// Linear backoff via a delay function:
///
/// ```
/// use std::time::Duration;
/// use steadfast::RetryPolicy;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(3)
///     .with_delay_fn(|attempt| Duration::from_millis(50) * attempt);
/// assert_eq!(policy.delay().before_retry(2), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    max_retries: Option<u32>,
    delay: Delay,
}

impl RetryPolicy {
    /// Create a policy with no retry budget and no delay.
    ///
    /// The result does not validate until
    /// [`with_max_retries`](Self::with_max_retries) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retries allowed after the first attempt.
    ///
    /// `0` means a single attempt and no retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Wait the same fixed duration before every retry.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Delay::Fixed(delay);
        self
    }

    /// Compute the wait before each retry from the 1-based count of
    /// failures so far.
    ///
    /// The function sees the increasing sequence `1, 2, 3, ...`, which is
    /// enough to express any backoff shape in terms of attempt count.
    pub fn with_delay_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.delay = Delay::Computed(Arc::new(f));
        self
    }

    /// The retry budget, if one has been set.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// The wait strategy between attempts.
    pub fn delay(&self) -> &Delay {
        &self.delay
    }

    /// Check that the policy can be bound to an operation.
    ///
    /// A policy is valid once `max_retries` has been set. This is the same
    /// check [`Retrier::new`](crate::Retrier::new) performs.
    ///
    /// # Examples
    ///
    /// ```
    /// use steadfast::{PolicyError, RetryPolicy};
    ///
    /// assert_eq!(
    ///     RetryPolicy::new().validate(),
    ///     Err(PolicyError::MissingMaxRetries),
    /// );
    /// assert!(RetryPolicy::new().with_max_retries(0).validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self.max_retries {
            Some(_) => Ok(()),
            None => Err(PolicyError::MissingMaxRetries),
        }
    }
}
