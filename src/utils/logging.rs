//! Logging macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! A module opts in by declaring the flag and importing the macros from the
//! crate root:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_elapsed, log_info};
//!
//! let started = std::time::Instant::now();
//! log_info!("scoring {} chunks", 3);
//! log_elapsed!("Sentiment analysis", started);
//! ```

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

/// Logs the wall-clock time elapsed since `$started` (a `std::time::Instant`)
/// as `"<label> time: <seconds> seconds"`.
#[macro_export]
macro_rules! log_elapsed {
    ($label:expr, $started:expr) => {
        if ENABLE_LOGS {
            log::info!(
                "{} time: {:.2} seconds",
                $label,
                $started.elapsed().as_secs_f64()
            );
        }
    };
}
