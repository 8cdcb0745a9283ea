//! # tracing-labeled-logs
//!
//! Labeled, sampled logging on top of the `tracing` ecosystem.
//!
//! Each log call can carry free-form labels and up to two sampling rules. The
//! rules are tracked per call key, so a hot loop that logs the same thing
//! thousands of times can be thinned out while other messages pass untouched:
//!
//! - **Count sampling** (`rate_count(n)`): forward the 1st, (n+1)th, (2n+1)th...
//!   invocation with this key
//! - **Time sampling** (`rate_time(d)`): forward at most one invocation with
//!   this key per interval `d`
//!
//! Forwarded messages are prefixed so readers can tell a line was sampled:
//! `[rateCount-10] [rateTime-5000ms] [db] connection refused`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tracing_labeled_logs::{global, info, warn};
//! use std::time::Duration;
//!
//! tracing_subscriber::fmt().init();
//!
//! info!("service started on port {}", 8080);
//!
//! for _ in 0..1_000 {
//!     // Forwarded on the 1st, 101st, 201st, ... call
//!     warn!(global::rate_count(100) => "retrying upstream {}", "billing-api");
//! }
//!
//! global::labels(["billing", "retry"])
//!     .rate_time(Duration::from_secs(30))
//!     .error("invoice {} still pending", &[&"INV-7"]);
//! ```
//!
//! ## Call Keys
//!
//! Sampling state is kept per **key**, derived from the call's arguments, its
//! format string, and its level:
//!
//! - Labels are **not** part of the key
//! - The same format with different arguments yields different keys
//! - The same format at different levels yields different keys
//!
//! ```rust
//! # use tracing_labeled_logs::Logs;
//! let logs = Logs::new();
//! logs.rate_count(10).warn("user {} rejected", &[&"alice"]); // key A
//! logs.rate_count(10).warn("user {} rejected", &[&"bob"]);   // key B, counted separately
//! ```
//!
//! Calls without a sampling rule never touch the sampling state.
//!
//! ## Configuration
//!
//! A [`Logs`] handle owns the sampling state, a [`Clock`], and a [`Sink`]. Most
//! programs use the process-wide handle from [`global`], optionally installing
//! a configured one at startup:
//!
//! ```rust
//! use tracing_labeled_logs::{global, Logs, TracingSink};
//! use std::sync::Arc;
//!
//! let logs = Logs::builder()
//!     .with_sink(Arc::new(TracingSink::new()))
//!     .build();
//!
//! global::install(logs).expect("installed once at startup");
//! ```
//!
//! Forwarded calls go to the current `tracing` subscriber under the
//! `tracing_labeled_logs` target, so subscriber filters apply as usual.
//!
//! ## Observability
//!
//! ```rust
//! # use tracing_labeled_logs::Logs;
//! let logs = Logs::new();
//! let snapshot = logs.metrics().snapshot();
//! println!("Forwarded: {}", snapshot.events_forwarded);
//! println!("Suppression rate: {:.2}%", snapshot.suppression_rate() * 100.0);
//! ```
//!
//! ## Memory Management
//!
//! Sampling state grows by one entry per distinct key and is never evicted.
//! Avoid sampled calls whose arguments are unbounded (request ids, timestamps):
//! each distinct value creates a new key. [`Logs::tracked_keys`] reports the
//! current size of both maps.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

pub mod global;
#[cfg(feature = "json")]
pub mod json;
pub mod macros;

// Re-export commonly used types for convenience
pub use domain::{
    call::LogCallSpec,
    policy::{CountSampling, PolicyDecision, TimeSampling},
    rate_key::RateKey,
    severity::{Severity, UnknownSeverity},
};

pub use application::{
    logger::{DefaultStorage, Emission, LogCall, Logs, LogsBuilder},
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, Sink, Storage},
    registry::ThrottleRegistry,
    sampler::{SampleDecision, Sampler},
    watcher::WatchError,
};

pub use infrastructure::{
    clock::SystemClock, format::render, storage::ShardedStorage, tracing_sink::TracingSink,
};

pub use global::InstallError;
