//! Logging macros gated on a module-level `ENABLE_LOGS` const.
//!
//! High-frequency call sites (per-scroll-sample, per-delivery) define
//! `const ENABLE_LOGS: bool = ...;` and use these instead of bare `log`
//! macros, so a module can be silenced without touching its code paths.

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
