//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and owns the runtime state:
//! - Throttle registry (shared per-key counters and timestamps)
//! - Sampler (count then time decisions)
//! - Logs handle and per-call builder
//! - Time watcher
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod logger;
pub mod metrics;
pub mod ports;
pub mod registry;
pub mod sampler;
pub mod watcher;
