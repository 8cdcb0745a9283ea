//! Mock implementations for testing.
//!
//! This module provides test doubles for the clock and sink ports, plus a
//! capturing `tracing` layer for checking what reaches a subscriber.

pub mod clock;
pub mod layer;
pub mod sink;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use sink::{CapturedCall, MockSink};
