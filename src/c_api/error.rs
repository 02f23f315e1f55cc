//! Error objects handed across the C boundary

use crate::error::Error;
use std::ffi::CString;
use std::os::raw::c_char;

/// Opaque error handle
#[repr(C)]
pub struct osrmc_error_t {
    _private: [u8; 0],
}

struct ErrorInternal {
    code: CString,
    message: CString,
}

impl osrmc_error_t {
    fn from_internal(internal: Box<ErrorInternal>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<ErrorInternal> {
        Box::from_raw(ptr as *mut ErrorInternal)
    }

    unsafe fn as_internal<'a>(ptr: *const Self) -> &'a ErrorInternal {
        &*(ptr as *const ErrorInternal)
    }
}

// Interior NULs would truncate the C string; strip them instead of failing
fn to_c_string(text: &str) -> CString {
    let bytes: Vec<u8> = text.bytes().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

/// Store `err` in the out-parameter, or drop it when the caller passed NULL
///
/// # Safety
/// `slot` must be NULL or valid for writes
pub(crate) unsafe fn report(slot: *mut *mut osrmc_error_t, err: Error) {
    log::debug!("reporting {}: {}", err.code(), err);
    if slot.is_null() {
        return;
    }
    let internal = Box::new(ErrorInternal {
        code: to_c_string(err.code()),
        message: to_c_string(&err.to_string()),
    });
    *slot = osrmc_error_t::from_internal(internal);
}

/// Machine-readable error code
///
/// Stable codes such as `CONFIG_INVALID` or `WRONG_SERVICE_TYPE`, or the
/// engine's own code (e.g. `NoRoute`) for query failures.
///
/// # Returns
/// * NUL-terminated string valid until the error is destroyed
/// * NULL if `error` is NULL
///
/// # Safety
/// * `error` must be NULL or a live error handle
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_code(error: *const osrmc_error_t) -> *const c_char {
    if error.is_null() {
        return std::ptr::null();
    }
    osrmc_error_t::as_internal(error).code.as_ptr()
}

/// Human-readable error message
///
/// # Returns
/// * NUL-terminated string valid until the error is destroyed
/// * NULL if `error` is NULL
///
/// # Safety
/// * `error` must be NULL or a live error handle
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_message(error: *const osrmc_error_t) -> *const c_char {
    if error.is_null() {
        return std::ptr::null();
    }
    osrmc_error_t::as_internal(error).message.as_ptr()
}

/// Destroy an error
///
/// # Safety
/// * `error` must be NULL or a live error handle, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_destruct(error: *mut osrmc_error_t) {
    if !error.is_null() {
        drop(osrmc_error_t::into_internal(error));
    }
}
