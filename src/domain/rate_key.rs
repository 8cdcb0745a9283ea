//! Rate key derivation.
//!
//! A rate key identifies "the same logical log statement" for sampling purposes.
//! It is derived from:
//! - The `Display` form of every argument, in order
//! - The format string
//! - The severity level name
//!
//! The parts are concatenated without separators and hashed. Two statements whose
//! concatenated text is identical share a throttle bucket, which is accepted:
//! statements with identical text are indistinguishable to a reader anyway.

use crate::domain::severity::Severity;
use ahash::AHasher;
use std::fmt::{self, Display};
use std::hash::Hasher;

/// Identity of a logical log statement.
///
/// Keys are stable for the lifetime of the process. `AHasher::default()` uses
/// fixed keys, so identical inputs always hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateKey(u64);

impl RateKey {
    /// Derive the key for a statement.
    ///
    /// # Arguments
    /// * `format` - Format string (may be empty)
    /// * `level` - Severity the statement is logged at
    /// * `arguments` - Positional arguments (may be empty)
    ///
    /// # Panics
    /// Panics if an argument's `Display` implementation returns an error, the same
    /// way `format!` and `ToString` do. Conversion failures are the caller's bug and
    /// are never swallowed.
    pub fn derive(format: &str, level: Severity, arguments: &[&dyn Display]) -> Self {
        let mut text = String::with_capacity(format.len() + 8 + arguments.len() * 8);
        for argument in arguments {
            text.push_str(&argument.to_string());
        }
        text.push_str(format);
        text.push_str(level.as_str());
        Self::from_text(&text)
    }

    fn from_text(text: &str) -> Self {
        let mut hasher = AHasher::default();
        hasher.write(text.as_bytes());
        RateKey(hasher.finish())
    }

    /// Get the raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
