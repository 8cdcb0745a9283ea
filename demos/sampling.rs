//! Time sampling and the elapsed-time watcher.
//!
//! A simulated retry loop runs for about two seconds; the time-sampled
//! warning is forwarded at most once every 500ms.

use std::time::{Duration, Instant};
use tracing_labeled_logs::{global, Severity};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Time Sampling Example ===\n");

    let start = Instant::now();
    let mut attempts = 0;
    while start.elapsed() < Duration::from_secs(2) {
        attempts += 1;
        global::rate_time(Duration::from_millis(500))
            .labels(["retry"])
            .warn("connection to {} refused", &[&"db-primary"]);
        std::thread::sleep(Duration::from_millis(20));
    }

    let logs = global::logs();
    let snapshot = logs.metrics().snapshot();
    println!(
        "\n{} attempts: {} forwarded, {} suppressed by time",
        attempts, snapshot.events_forwarded, snapshot.suppressed_by_time
    );

    println!("\nWatching a slow task:");
    let total = logs.watch(
        Severity::Info,
        "sum squares",
        Some(Duration::from_millis(1)),
        || {
            std::thread::sleep(Duration::from_millis(15));
            (1..=1_000u64).map(|n| n * n).sum::<u64>()
        },
    );
    match total {
        Ok(total) => println!("sum = {}", total),
        Err(e) => eprintln!("{}", e),
    }

    println!("\n=== Example Complete ===");
}
