/// Logging level trace, compiled out unless the `dev` feature or `test` cfg is active.
#[macro_export]
macro_rules! dev_trace {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::trace!($($arg)*);
        }
    };
}

/// Logging level debug, compiled out unless the `dev` feature or `test` cfg is active.
#[macro_export]
macro_rules! dev_debug {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::debug!($($arg)*);
        }
    };
}

/// Logging level info, compiled out unless the `dev` feature or `test` cfg is active.
#[macro_export]
macro_rules! dev_info {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::info!($($arg)*);
        }
    };
}

/// Logging level warn, compiled out unless the `dev` feature or `test` cfg is active.
#[macro_export]
macro_rules! dev_warn {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::warn!($($arg)*);
        }
    };
}

/// Logging level error, compiled out unless the `dev` feature or `test` cfg is active.
#[macro_export]
macro_rules! dev_error {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::error!($($arg)*);
        }
    };
}

/// Increments a named counter when the `metrics` feature is enabled; a no-op otherwise.
#[macro_export]
macro_rules! update_metrics_counter {
    ($name:ident) => {
        #[cfg(feature = "metrics")]
        $crate::metrics::$name().inc();
    };
}

/// Sets a named gauge when the `metrics` feature is enabled; a no-op otherwise.
#[macro_export]
macro_rules! update_metrics_gauge {
    ($name:ident, $value:expr) => {
        #[cfg(feature = "metrics")]
        $crate::metrics::$name().set($value);
    };
}
