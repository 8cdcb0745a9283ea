//! Basic example demonstrating labels and count sampling.
//!
//! Run with `RUST_LOG=debug cargo run --example basic` to see every level.

use tracing_labeled_logs::{global, info, warn, Logs};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Labeled Logging Example ===\n");

    // Labels are prefixed in order
    global::labels(["checkout", "payment"]).info("charged order {} for {}", &[&1042, &"$19.99"]);

    // Macros accept any Display arguments
    info!("service ready on port {}", 8080);

    println!("\nEmitting 10 identical warnings, forwarding every 3rd:");
    for _ in 0..10 {
        warn!(global::rate_count(3) => "upstream {} timed out", "billing-api");
    }

    println!("\nA dedicated handle keeps its own sampling state:");
    let logs = Logs::new();
    for _ in 0..10 {
        logs.rate_count(3).warn("upstream {} timed out", &[&"billing-api"]);
    }

    let snapshot = logs.metrics().snapshot();
    println!(
        "\nDedicated handle: {} forwarded, {} suppressed",
        snapshot.events_forwarded,
        snapshot.events_suppressed()
    );
    println!("\n=== Example Complete ===");
}
