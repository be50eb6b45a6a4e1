//! Integration tests for layered retriers wrapping other retriers

use steadfast::testing::{AlwaysFail, Flaky};
use steadfast::{Operation, OperationExt, Retrier, RetryPolicy};

#[tokio::test]
async fn inner_and_outer_budgets_multiply() {
    let inner = Retrier::new(RetryPolicy::new().with_max_retries(2))
        .unwrap()
        .wrap(Flaky::new(5, "through", "blip"));
    let outer = Retrier::new(RetryPolicy::new().with_max_retries(1))
        .unwrap()
        .wrap(inner);

    // First inner run burns 3 attempts and exhausts; the outer retry gives
    // the inner sequence a second run, which succeeds on its third attempt.
    assert_eq!(outer.call().await.unwrap(), "through");
    assert_eq!(outer.operation().operation().calls(), 6);
}

#[tokio::test]
async fn outer_collects_inner_exhaustions_as_single_failures() {
    let inner = Retrier::new(RetryPolicy::new().with_max_retries(1))
        .unwrap()
        .wrap(AlwaysFail::new("never"));
    let outer = Retrier::new(RetryPolicy::new().with_max_retries(2))
        .unwrap()
        .wrap(inner);

    let exhausted = outer.call().await.unwrap_err();
    assert_eq!(exhausted.attempts(), 3);
    assert!(exhausted.errors.iter().all(|run| run.attempts() == 2));
    assert_eq!(outer.operation().operation().calls(), 6);

    assert_eq!(exhausted.last_error().last_error(), &"never");
    assert_eq!(
        exhausted.to_string(),
        "maximum retries reached after 3 attempts: \
         maximum retries reached after 2 attempts: never",
    );
}

#[tokio::test]
async fn three_layers_compose() {
    let once = RetryPolicy::new().with_max_retries(1);
    let layered = Retrier::new(once.clone())
        .unwrap()
        .wrap(
            Retrier::new(once.clone())
                .unwrap()
                .wrap(Retrier::new(once).unwrap().wrap(AlwaysFail::new("deep"))),
        );

    layered.call().await.unwrap_err();
    assert_eq!(layered.operation().operation().operation().calls(), 8);
}

#[tokio::test]
async fn fluent_chaining_layers_policies() {
    let wrapped = Flaky::new(3, 1, "flap")
        .with_retries(RetryPolicy::new().with_max_retries(1))
        .unwrap()
        .with_retries(RetryPolicy::new().with_max_retries(1))
        .unwrap();

    assert_eq!(wrapped.call().await.unwrap(), 1);
    assert_eq!(wrapped.operation().operation().calls(), 4);
}
