//! Call-site macros
//!
//! All of them go through the global logger and capture the file, line and
//! enclosing function of the call.

/// Path of the enclosing function, e.g. `my_crate::config::load`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let mut name = name.strip_suffix("::f").unwrap_or(name);
        // Closures, including test bodies wrapped by attribute macros, add segments.
        while let Some(stripped) = name.strip_suffix("::{{closure}}") {
            name = stripped;
        }
        name
    }};
}

/// [`Location`](crate::Location) of the macro call.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(file!(), $crate::__function_name!(), line!())
    };
}

/// Log a formatted message at `level`.
///
/// ```rust
/// use switchlog::LogLevel;
///
/// let config = "settings.json";
/// switchlog::log!(LogLevel::Info, "Reading config file \"{}\"...", config);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::global::log($level, $crate::location!(), ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Error, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! notice {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Notice, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Info, $($arg)+) };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Verbose, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! noisy {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::Noisy, $($arg)+) };
}

#[macro_export]
macro_rules! very_noisy {
    ($($arg:tt)+) => { $crate::log!($crate::LogLevel::VeryNoisy, $($arg)+) };
}

/// Log `"<context>: <error>"` at error level, `perror` style.
///
/// ```rust
/// if let Err(e) = std::fs::read("/nonexistent/switchlog.conf") {
///     switchlog::log_io_error!("read config", e);
/// }
/// ```
#[macro_export]
macro_rules! log_io_error {
    ($context:expr, $err:expr) => {
        $crate::log!($crate::LogLevel::Error, "{}: {}", $context, $err)
    };
}

/// Log a generic error about an unimplemented feature.
#[macro_export]
macro_rules! not_implemented {
    () => {
        $crate::log!(
            $crate::LogLevel::Error,
            "Not implemented, yet. Please tell developers that you need this."
        )
    };
}
