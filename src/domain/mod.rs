//! Domain layer - pure logic with no shared state.
//!
//! This layer contains the core concepts of the sampling engine:
//! - Severity levels
//! - Rate key derivation
//! - Count and time sampling policies
//! - Per-call configuration and prefix composition
//!
//! All types in this layer are pure and easily testable.

pub mod call;
pub mod policy;
pub mod rate_key;
pub mod severity;
