//! Property-based tests for retry attempt counts and failure trails

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use steadfast::testing::{AlwaysFail, Flaky};
use steadfast::{Operation, Retrier, RetryPolicy};

proptest! {
    #[test]
    fn prop_exhaustion_makes_budget_plus_one_attempts(max_retries in 0u32..8) {
        let (attempts, calls) = tokio_test::block_on(async move {
            let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(max_retries))
                .unwrap()
                .wrap(AlwaysFail::new("down"));

            let exhausted = wrapped.call().await.unwrap_err();
            (exhausted.attempts(), wrapped.operation().calls())
        });

        prop_assert_eq!(attempts, max_retries as usize + 1);
        prop_assert_eq!(calls, max_retries + 1);
    }

    #[test]
    fn prop_success_on_the_kth_attempt_stops_there(
        max_retries in 0u32..8,
        offset in 0u32..8
    ) {
        // Pick a succeeding attempt that always fits inside the budget.
        let succeed_on = 1 + offset % (max_retries + 1);

        let (value, calls) = tokio_test::block_on(async move {
            let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(max_retries))
                .unwrap()
                .wrap(Flaky::new(succeed_on - 1, succeed_on, "flap"));

            (wrapped.call().await.unwrap(), wrapped.operation().calls())
        });

        prop_assert_eq!(value, succeed_on);
        prop_assert_eq!(calls, succeed_on);
    }

    #[test]
    fn prop_the_trail_preserves_failure_order(max_retries in 0u32..6) {
        let trail = tokio_test::block_on(async move {
            let calls = Arc::new(AtomicU32::new(0));
            let counted = calls.clone();
            let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(max_retries))
                .unwrap()
                .wrap(move || {
                    let counted = counted.clone();
                    async move {
                        let n = counted.fetch_add(1, Ordering::SeqCst) + 1;
                        Err::<(), _>(format!("failure {n}"))
                    }
                });

            wrapped.call().await.unwrap_err().into_errors().into_vec()
        });

        let expected: Vec<String> = (1..=max_retries + 1)
            .map(|n| format!("failure {n}"))
            .collect();
        prop_assert_eq!(trail, expected);
    }
}

#[cfg(feature = "proptest")]
mod generated_policies {
    use super::*;

    proptest! {
        #[test]
        fn prop_any_generated_policy_drives_a_full_run(policy: RetryPolicy) {
            let budget = policy.max_retries().unwrap();
            let attempts = tokio_test::block_on(async move {
                let wrapped = Retrier::new(policy).unwrap().wrap(AlwaysFail::new("down"));
                wrapped.call().await.unwrap_err().attempts()
            });

            prop_assert_eq!(attempts, budget as usize + 1);
        }
    }
}
