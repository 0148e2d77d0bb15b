//! Logging infrastructure for fastsandra.
//!
//! All events go through `tracing` with target "fastsandra" and carry an
//! `event` field for filtering. The library never installs a subscriber;
//! applications configure one via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (e.g., "registry", "assembler")
//! - Use `%` for Display, `?` for Debug formatting
//! - Never log per-row values

/// Target for all fastsandra log events.
pub(crate) const FASTSANDRA_TARGET: &str = "fastsandra";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "registry",
///     event = "type_registered",
///     tag = %descriptor.tag(),
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::FASTSANDRA_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::FASTSANDRA_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
