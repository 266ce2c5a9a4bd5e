//! Logging shims over the optional `log` dependency.
//!
//! With the `logging` feature enabled these forward to `log::debug!` and
//! `log::trace!`; without it the arguments are type-checked and dropped.

macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        {
            log::debug!($($arg)*);
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! trace_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        {
            log::trace!($($arg)*);
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
