//! Logging for processes that embed the permission resolver.
//!
//! Call [`init`] once at startup; format and filter come from the environment
//! (see [`tracing::LOG_FORMAT_ENV`] and `RUST_LOG`).

/// Install the global subscriber using environment settings.
///
/// Only the first call installs anything.
pub fn init() {
    tracing::init();
}

/// Subscriber construction and log format selection.
pub mod tracing;

pub use self::tracing::LogFormat;
