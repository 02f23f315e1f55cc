//! C API for osrmc
//!
//! This module provides a stable C ABI for use from C and C++ programs. The
//! header `include/osrmc/osrmc.h` is generated from it by cbindgen.
//!
//! Conventions shared by every function:
//!
//! * Handles are opaque pointers owned by the caller and released with the
//!   matching `*_destruct` function. Destroying NULL is a no-op.
//! * Every fallible function takes a trailing `osrmc_error_t **error`. On
//!   failure it receives a new error (release with `osrmc_error_destruct`)
//!   and the return value is the sentinel: NULL, 0, or nothing for `void`.
//!   On success the slot is left untouched. Passing NULL for `error` is
//!   allowed; the failure is then only visible through the sentinel.
//! * Panics never cross the boundary; they are reported as `INTERNAL`.
//!
//! # Example
//! ```c
//! osrmc_error_t *error = NULL;
//! osrmc_config_t *config = osrmc_config_construct("berlin.osrm", &error);
//! if (error) {
//!     fprintf(stderr, "%s: %s\n", osrmc_error_code(error), osrmc_error_message(error));
//!     osrmc_error_destruct(error);
//!     return 1;
//! }
//! osrmc_config_set_engine(config, &my_engine_vtable, &error);
//! osrmc_osrm_t *osrm = osrmc_osrm_construct(config, &error);
//! osrmc_config_destruct(config);
//! ```

#![allow(non_camel_case_types)]

pub mod blob;
pub mod config;
pub mod error;
pub mod params;
pub mod service;

use self::error::osrmc_error_t;
use crate::error::{Error, Result};
use crate::params::{OutputFormat, ServiceKind};
use std::any::Any;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uint};

// ============================================================================
// VERSION
// ============================================================================

/// ABI major version; incompatible changes bump it
pub const OSRMC_VERSION_MAJOR: c_uint = 6;
/// ABI minor version
pub const OSRMC_VERSION_MINOR: c_uint = 0;
/// Packed version as returned by [`osrmc_get_version`]
pub const OSRMC_VERSION: c_uint = (OSRMC_VERSION_MAJOR << 16) | OSRMC_VERSION_MINOR;

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// Output format selector (one of the `OSRMC_FORMAT_*` values)
pub type osrmc_output_format_t = c_int;
/// JSON text
pub const OSRMC_FORMAT_JSON: osrmc_output_format_t = 0;
/// FlatBuffers binary
pub const OSRMC_FORMAT_FLATBUFFERS: osrmc_output_format_t = 1;
/// Raw binary (tile service only)
pub const OSRMC_FORMAT_BINARY: osrmc_output_format_t = 2;

/// Service discriminant (one of the `OSRMC_SERVICE_*` values)
pub type osrmc_service_t = c_int;
/// Nearest service
pub const OSRMC_SERVICE_NEAREST: osrmc_service_t = 0;
/// Route service
pub const OSRMC_SERVICE_ROUTE: osrmc_service_t = 1;
/// Table service
pub const OSRMC_SERVICE_TABLE: osrmc_service_t = 2;
/// Match service
pub const OSRMC_SERVICE_MATCH: osrmc_service_t = 3;
/// Trip service
pub const OSRMC_SERVICE_TRIP: osrmc_service_t = 4;
/// Tile service
pub const OSRMC_SERVICE_TILE: osrmc_service_t = 5;

/// Routing algorithm (one of the `OSRMC_ALGORITHM_*` values)
pub type osrmc_algorithm_t = c_int;
/// Contraction Hierarchies
pub const OSRMC_ALGORITHM_CH: osrmc_algorithm_t = 0;
/// Multi-Level Dijkstra
pub const OSRMC_ALGORITHM_MLD: osrmc_algorithm_t = 1;

/// Approach side (one of the `OSRMC_APPROACH_*` values)
pub type osrmc_approach_t = c_int;
/// Curb side
pub const OSRMC_APPROACH_CURB: osrmc_approach_t = 0;
/// Either side
pub const OSRMC_APPROACH_UNRESTRICTED: osrmc_approach_t = 1;
/// Opposite side
pub const OSRMC_APPROACH_OPPOSITE: osrmc_approach_t = 2;

/// Snapping mode (one of the `OSRMC_SNAPPING_*` values)
pub type osrmc_snapping_t = c_int;
/// Only routable edges
pub const OSRMC_SNAPPING_DEFAULT: osrmc_snapping_t = 0;
/// Any edge
pub const OSRMC_SNAPPING_ANY: osrmc_snapping_t = 1;

pub(crate) fn service_from_c(value: osrmc_service_t) -> Result<ServiceKind> {
    ServiceKind::from_discriminant(value)
        .ok_or_else(|| Error::invalid(format!("unknown service {}", value)))
}

pub(crate) fn format_from_c(value: osrmc_output_format_t) -> Result<OutputFormat> {
    match value {
        OSRMC_FORMAT_JSON => Ok(OutputFormat::Json),
        OSRMC_FORMAT_FLATBUFFERS => Ok(OutputFormat::Flatbuffers),
        OSRMC_FORMAT_BINARY => Ok(OutputFormat::Binary),
        other => Err(Error::invalid(format!("unknown output format {}", other))),
    }
}

pub(crate) fn format_to_c(format: OutputFormat) -> osrmc_output_format_t {
    match format {
        OutputFormat::Json => OSRMC_FORMAT_JSON,
        OutputFormat::Flatbuffers => OSRMC_FORMAT_FLATBUFFERS,
        OutputFormat::Binary => OSRMC_FORMAT_BINARY,
    }
}

// ============================================================================
// BOUNDARY HELPERS
// ============================================================================

/// Run a fallible body, reporting `Err` and panics through an error out-param
///
/// Evaluates to the body's value on success and to `$fail` otherwise.
macro_rules! catch_panic {
    ($error:expr, $fail:expr, $body:block) => {{
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
            || -> $crate::error::Result<_> { $body },
        ));
        $crate::c_api::settle($error, $fail, outcome)
    }};
}
pub(crate) use catch_panic;

pub(crate) unsafe fn settle<T>(
    error: *mut *mut osrmc_error_t,
    fail: T,
    outcome: std::thread::Result<Result<T>>,
) -> T {
    match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            error::report(error, err);
            fail
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("panic caught at C boundary: {}", message);
            error::report(error, Error::Internal(message));
            fail
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Reject NULL handles
pub(crate) fn check_handle<T>(ptr: *const T, what: &str) -> Result<()> {
    if ptr.is_null() {
        return Err(Error::invalid(format!("{} handle is NULL", what)));
    }
    Ok(())
}

/// Borrow a required NUL-terminated UTF-8 string
///
/// # Safety
/// `ptr` must be NULL or a valid NUL-terminated string that outlives `'a`
pub(crate) unsafe fn c_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(Error::invalid(format!("{} is NULL", what)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| Error::invalid(format!("{} is not valid UTF-8", what)))
}

/// Borrow an optional string, NULL maps to `None`
///
/// # Safety
/// Same as [`c_str`]
pub(crate) unsafe fn opt_c_str<'a>(ptr: *const c_char, what: &str) -> Result<Option<&'a str>> {
    if ptr.is_null() {
        return Ok(None);
    }
    c_str(ptr, what).map(Some)
}

// ============================================================================
// LIBRARY
// ============================================================================

/// Packed ABI version: `major << 16 | minor`
#[no_mangle]
pub extern "C" fn osrmc_get_version() -> c_uint {
    OSRMC_VERSION
}

/// Whether the loaded library matches the header's major version
///
/// # Returns
/// * 1 if compatible
/// * 0 otherwise
#[no_mangle]
pub extern "C" fn osrmc_is_abi_compatible() -> c_int {
    c_int::from(osrmc_get_version() >> 16 == OSRMC_VERSION_MAJOR)
}

/// Log library diagnostics to stderr
///
/// Installs an `env_logger` the first time it is called; later calls have no
/// effect. `RUST_LOG` refines the filter further.
///
/// # Parameters
/// * `level` - `error`, `warn`, `info`, `debug`, `trace` or `off`; NULL means `info`
/// * `error` - Error out-parameter
///
/// # Safety
/// * `level` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_enable_logging(level: *const c_char, error: *mut *mut osrmc_error_t) {
    catch_panic!(error, (), {
        let level = match opt_c_str(level, "log level")? {
            Some(name) => crate::logging::parse_level(name)?,
            None => log::LevelFilter::Info,
        };
        crate::logging::init(level);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_version_packing() {
        assert_eq!(osrmc_get_version(), 6 << 16);
        assert_eq!(osrmc_is_abi_compatible(), 1);
    }

    #[test]
    fn test_format_discriminants() {
        for format in [OutputFormat::Json, OutputFormat::Flatbuffers, OutputFormat::Binary] {
            assert_eq!(format_from_c(format_to_c(format)).unwrap(), format);
        }
        assert_eq!(format_from_c(7).unwrap_err().code(), "INVALID_ARGUMENT");
        assert_eq!(service_from_c(OSRMC_SERVICE_TILE).unwrap(), ServiceKind::Tile);
        assert!(service_from_c(-1).is_err());
    }

    #[test]
    fn test_panic_becomes_internal() {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let explode = true;
        let value: c_int = unsafe {
            catch_panic!(&mut err, -1, {
                if explode {
                    panic!("engine exploded");
                }
                Ok(0)
            })
        };
        assert_eq!(value, -1);
        assert!(!err.is_null());
        unsafe {
            let code = CStr::from_ptr(error::osrmc_error_code(err));
            assert_eq!(code.to_str().unwrap(), "INTERNAL");
            error::osrmc_error_destruct(err);
        }
    }

    #[test]
    fn test_enable_logging_rejects_unknown_level() {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        unsafe {
            let level = std::ffi::CString::new("loud").unwrap();
            osrmc_enable_logging(level.as_ptr(), &mut err);
            assert!(!err.is_null());
            error::osrmc_error_destruct(err);

            let mut err: *mut osrmc_error_t = ptr::null_mut();
            osrmc_enable_logging(ptr::null(), &mut err);
            assert!(err.is_null());
        }
    }
}
