//! Demonstrates tracing integration with retries
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use steadfast::prelude::*;
use steadfast::testing::{AlwaysFail, Flaky};

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    // A flaky fetch: each failed attempt emits a debug event carrying the
    // attempt number and the wait before the next try.
    let fetch = Retrier::new(
        RetryPolicy::new()
            .with_max_retries(4)
            .with_delay(Duration::from_millis(50)),
    )
    .unwrap()
    .wrap(Flaky::new(2, "payload", "connection reset"));

    match fetch.call().await {
        Ok(body) => tracing::info!(body, "fetch recovered"),
        Err(e) => tracing::error!("fetch failed: {}", e),
    }

    // A hopeless operation: exhaustion emits a warn event with the final
    // attempt count before the error is returned.
    let doomed = Retrier::new(
        RetryPolicy::new()
            .with_max_retries(2)
            .with_delay(Duration::from_millis(25)),
    )
    .unwrap()
    .wrap(AlwaysFail::new("disk offline"));

    match doomed.call().await {
        Ok(()) => tracing::info!("unexpected success"),
        Err(e) => tracing::warn!(attempts = e.attempts(), "gave up: {}", e),
    }

    tracing::info!("Tracing demo complete");
}
