//! Variadic logging macros.
//!
//! Each macro takes a format and any number of `Display` arguments. The plain
//! form logs through the [global handle](crate::global); the `call =>` form
//! finishes an explicit [`Logs`](crate::Logs) or [`LogCall`](crate::LogCall):
//!
//! ```
//! use tracing_labeled_logs::{info, warn, Logs};
//!
//! let logs = Logs::new();
//! let user = "alice";
//!
//! info!("user {} logged in", user);
//! warn!(logs.labels(["auth"]).rate_count(10) => "user {} failed {} times", user, 3);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __labeled_log {
    ($level:ident, $call:expr => $format:expr $(, $arg:expr)* $(,)?) => {
        $call.$level($format, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
    ($level:ident, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::$level($format, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at TRACE. See the [module docs](crate::macros) for the two forms.
#[macro_export]
macro_rules! trace {
    ($($args:tt)+) => {
        $crate::__labeled_log!(trace, $($args)+)
    };
}

/// Log at DEBUG. See the [module docs](crate::macros) for the two forms.
#[macro_export]
macro_rules! debug {
    ($($args:tt)+) => {
        $crate::__labeled_log!(debug, $($args)+)
    };
}

/// Log at INFO. See the [module docs](crate::macros) for the two forms.
#[macro_export]
macro_rules! info {
    ($($args:tt)+) => {
        $crate::__labeled_log!(info, $($args)+)
    };
}

/// Log at WARN. See the [module docs](crate::macros) for the two forms.
#[macro_export]
macro_rules! warn {
    ($($args:tt)+) => {
        $crate::__labeled_log!(warn, $($args)+)
    };
}

/// Log at ERROR. See the [module docs](crate::macros) for the two forms.
#[macro_export]
macro_rules! error {
    ($($args:tt)+) => {
        $crate::__labeled_log!(error, $($args)+)
    };
}
