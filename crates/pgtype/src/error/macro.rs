// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Macro to create an Error from a diagnostic or a TypeError
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($crate::error::IntoDiagnostic::into_diagnostic($diagnostic))
	};
}

/// Macro to return an error from a diagnostic or a TypeError
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// Macro to create an Err result from a diagnostic or a TypeError
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
	() => {{
		fn f() {}
		fn type_name_of<T>(_: T) -> &'static str {
			std::any::type_name::<T>()
		}
		let name = type_name_of(f);
		&name[..name.len() - 3]
	}};
}

/// Builds an `INTERNAL_ERROR` diagnostic that records where it was raised.
#[macro_export]
macro_rules! internal_error {
	($reason:expr) => {
		$crate::error::internal::internal_with_context(
			$reason,
			$crate::error::internal::Location {
				file: file!(),
				line: line!(),
				column: column!(),
				function: $crate::__function_name!(),
			},
		)
	};
	($fmt:expr, $($arg:tt)*) => {
		$crate::internal_error!(format!($fmt, $($arg)*))
	};
}

/// Macro to create an internal error result with automatic source location
/// capture
#[macro_export]
macro_rules! internal_err {
    ($reason:expr) => {
        Err($crate::error::Error($crate::internal_error!($reason)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::error::Error($crate::internal_error!($fmt, $($arg)*)))
    };
}

/// Macro to return an internal error with automatic source location capture
#[macro_export]
macro_rules! return_internal_error {
    ($reason:expr) => {
        return Err($crate::error::Error($crate::internal_error!($reason)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error($crate::internal_error!($fmt, $($arg)*)))
    };
}

/// Aborts with a rendered internal error. Used for broken invariants that
/// cannot be recovered from at runtime.
#[macro_export]
macro_rules! panic_internal {
    ($reason:expr) => {
        panic!("{}", $crate::error::Error($crate::internal_error!($reason)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        panic!("{}", $crate::error::Error($crate::internal_error!($fmt, $($arg)*)))
    };
}
