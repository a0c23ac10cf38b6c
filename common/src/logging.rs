//! # Diagnostics Macros
//!
//! Thin wrappers over `tracing` so call sites across the workspace share one
//! import style. The `success!` and raw-print targets exist for the CLI
//! formatter, which renders them with their own symbols.

/// Event target the CLI formatter renders as a success line.
pub const SUCCESS_TARGET: &str = "identr::success";

/// Event target the CLI formatter passes through without decoration.
pub const PRINT_TARGET: &str = "identr::print";

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { $crate::__tracing::trace!($($arg)*) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::__tracing::debug!($($arg)*) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::__tracing::info!($($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::__tracing::warn!($($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::__tracing::error!($($arg)*) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "identr::success", $($arg)*)
    };
}
