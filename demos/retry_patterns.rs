//! Retry Patterns Example
//!
//! Demonstrates policy-driven retries for async operations.
//! Shows practical patterns including:
//! - Recovering from transient failures with a fixed delay
//! - Growing the wait with a computed backoff
//! - Reading the full failure trail after exhaustion
//! - Nesting retriers to layer budgets
//! - Fluent wrapping with `with_retries`

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use steadfast::prelude::*;
use steadfast::testing::Flaky;

// ==================== Fixed Delay ====================

/// Example 1: Recovering from transient failures
///
/// The operation fails twice, then succeeds. The policy allows up to five
/// retries with a flat 100ms wait between attempts.
async fn example_fixed_delay() {
    println!("\n=== Example 1: Fixed Delay ===");

    let attempts = Arc::new(AtomicU32::new(0));

    let wrapped = Retrier::new(
        RetryPolicy::new()
            .with_max_retries(5)
            .with_delay(Duration::from_millis(100)),
    )
    .unwrap()
    .wrap({
        let attempts = attempts.clone();
        move || {
            let attempts = attempts.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                println!("  Attempt {}", n);
                if n < 3 {
                    Err("transient failure")
                } else {
                    Ok("success!")
                }
            }
        }
    });

    match wrapped.call().await {
        Ok(value) => println!(
            "Success after {} attempts: {}",
            attempts.load(Ordering::SeqCst),
            value
        ),
        Err(exhausted) => println!("Gave up: {}", exhausted),
    }
}

// ==================== Computed Backoff ====================

/// Example 2: Growing the wait between attempts
///
/// The delay function receives the failure count, so the wait can double
/// on every consecutive failure.
async fn example_computed_backoff() {
    println!("\n=== Example 2: Computed Backoff ===");

    let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(4).with_delay_fn(
        |failures| {
            let wait = Duration::from_millis(50) * 2u32.pow(failures - 1);
            println!("  {} failure(s) so far, waiting {:?}", failures, wait);
            wait
        },
    ))
    .unwrap()
    .wrap(Flaky::new(3, "connected", "connection refused"));

    match wrapped.call().await {
        Ok(value) => println!(
            "Recovered after {} attempts: {}",
            wrapped.operation().calls(),
            value
        ),
        Err(exhausted) => println!("Gave up: {}", exhausted),
    }
}

// ==================== Failure Trails ====================

/// Example 3: Reading the trail after exhaustion
///
/// Errors are never classified or swallowed. When the budget runs out the
/// error carries every failure in the order it happened.
async fn example_failure_trail() {
    println!("\n=== Example 3: Failure Trail ===");

    let faults = ["timeout", "connection refused", "dns error"];
    let attempts = Arc::new(AtomicU32::new(0));

    let wrapped = Retrier::new(RetryPolicy::new().with_max_retries(3))
        .unwrap()
        .wrap({
            let attempts = attempts.clone();
            move || {
                let attempts = attempts.clone();
                async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst) as usize;
                    Err::<(), _>(faults[n % faults.len()])
                }
            }
        });

    match wrapped.call().await {
        Ok(()) => println!("Unexpectedly succeeded"),
        Err(exhausted) => {
            println!("{}", exhausted);
            for (attempt, error) in exhausted.errors.iter().enumerate() {
                println!("  attempt {}: {}", attempt + 1, error);
            }
        }
    }
}

// ==================== Nested Retriers ====================

/// Example 4: Layering budgets
///
/// A wrapped operation is itself an operation, so retriers nest. The inner
/// policy retries quickly; the outer policy restarts the whole inner
/// sequence after a longer pause.
async fn example_nested_retriers() {
    println!("\n=== Example 4: Nested Retriers ===");

    let inner = Retrier::new(RetryPolicy::new().with_max_retries(1))
        .unwrap()
        .wrap(Flaky::new(4, "fetched", "service warming up"));

    let outer = Retrier::new(
        RetryPolicy::new()
            .with_max_retries(2)
            .with_delay(Duration::from_millis(200)),
    )
    .unwrap()
    .wrap(inner);

    match outer.call().await {
        Ok(value) => println!(
            "Outer succeeded: {} ({} raw calls underneath)",
            value,
            outer.operation().operation().calls()
        ),
        Err(exhausted) => println!("Both layers exhausted: {}", exhausted),
    }
}

// ==================== Fluent Wrapping ====================

/// Example 5: Wrapping without naming a retrier
///
/// `with_retries` validates the policy and wraps in one step, and the free
/// `retry` function does the same for a prefix style.
async fn example_fluent_wrapping() {
    println!("\n=== Example 5: Fluent Wrapping ===");

    let wrapped = (|| async { Ok::<_, String>("pong") })
        .with_retries(RetryPolicy::new().with_max_retries(2))
        .unwrap();
    println!("Fluent: {}", wrapped.call().await.unwrap());

    let invalid = retry(RetryPolicy::new(), || async { Ok::<_, String>(()) });
    match invalid {
        Ok(_) => println!("Unexpectedly bound an incomplete policy"),
        Err(error) => println!("Rejected up front: {}", error),
    }
}

#[tokio::main]
async fn main() {
    println!("======================================");
    println!("       Retry Patterns Example         ");
    println!("======================================");

    example_fixed_delay().await;
    example_computed_backoff().await;
    example_failure_trail().await;
    example_nested_retriers().await;
    example_fluent_wrapping().await;

    println!("\n======================================");
    println!("           Examples Complete           ");
    println!("======================================");
}
