//! Process-wide logging handle.
//!
//! Most code logs through one shared [`Logs`] so that throttle state is shared
//! by every call site in the process. Install a configured handle once at
//! startup; otherwise the first use creates the default one (tracing sink,
//! system clock).
//!
//! ```
//! use tracing_labeled_logs::global;
//!
//! global::labels(["startup"]).info("listening on port {}", &[&8080]);
//! global::rate_count(100).debug("heartbeat", &[]);
//! ```

use crate::application::logger::{Emission, LogCall, Logs};
use std::fmt::{self, Display};
use std::sync::OnceLock;
use std::time::Duration;

static GLOBAL: OnceLock<Logs> = OnceLock::new();

/// Error returned by [`install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallError {
    /// A handle was installed, or the default was created by an earlier call
    AlreadyInstalled,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::AlreadyInstalled => {
                write!(f, "global logging handle already initialized")
            }
        }
    }
}

impl std::error::Error for InstallError {}

/// Install the process-wide handle.
///
/// # Errors
/// Returns [`InstallError::AlreadyInstalled`] if a handle is already in place,
/// including the default one created by an earlier [`logs`] call.
pub fn install(logs: Logs) -> Result<(), InstallError> {
    GLOBAL
        .set(logs)
        .map_err(|_| InstallError::AlreadyInstalled)
}

/// The process-wide handle, created with defaults on first use.
pub fn logs() -> &'static Logs {
    GLOBAL.get_or_init(Logs::new)
}

/// Start a call with a label list on the global handle.
pub fn labels<I, L>(labels: I) -> LogCall<'static>
where
    I: IntoIterator<Item = L>,
    L: Into<String>,
{
    logs().labels(labels)
}

/// Start a call with one label on the global handle.
pub fn label(label: impl Into<String>) -> LogCall<'static> {
    logs().label(label)
}

/// Start a count-sampled call on the global handle.
pub fn rate_count(every: u32) -> LogCall<'static> {
    logs().rate_count(every)
}

/// Start a time-sampled call on the global handle.
pub fn rate_time(min_interval: Duration) -> LogCall<'static> {
    logs().rate_time(min_interval)
}

pub fn trace(format: &str, arguments: &[&dyn Display]) -> Emission {
    logs().trace(format, arguments)
}

pub fn debug(format: &str, arguments: &[&dyn Display]) -> Emission {
    logs().debug(format, arguments)
}

pub fn info(format: &str, arguments: &[&dyn Display]) -> Emission {
    logs().info(format, arguments)
}

pub fn warn(format: &str, arguments: &[&dyn Display]) -> Emission {
    logs().warn(format, arguments)
}

pub fn error(format: &str, arguments: &[&dyn Display]) -> Emission {
    logs().error(format, arguments)
}
