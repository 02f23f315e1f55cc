//! Blob handles

use crate::blob::Blob;
use std::os::raw::c_char;
use std::ptr;

/// Opaque blob handle
#[repr(C)]
pub struct osrmc_blob_t {
    _private: [u8; 0],
}

impl osrmc_blob_t {
    pub(crate) fn from_internal(internal: Box<Blob>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<Blob> {
        Box::from_raw(ptr as *mut Blob)
    }

    unsafe fn as_internal<'a>(ptr: *const Self) -> &'a Blob {
        &*(ptr as *const Blob)
    }
}

/// Pointer to the blob's bytes
///
/// The bytes are not NUL-terminated; use [`osrmc_blob_size`] for the length.
///
/// # Returns
/// * Non-null pointer valid until the blob is destroyed
/// * NULL if `blob` is NULL
///
/// # Safety
/// * `blob` must be NULL or a live blob handle
#[no_mangle]
pub unsafe extern "C" fn osrmc_blob_data(blob: *const osrmc_blob_t) -> *const c_char {
    if blob.is_null() {
        return ptr::null();
    }
    osrmc_blob_t::as_internal(blob).as_ptr() as *const c_char
}

/// Exact byte length of the blob, 0 if `blob` is NULL
///
/// # Safety
/// * `blob` must be NULL or a live blob handle
#[no_mangle]
pub unsafe extern "C" fn osrmc_blob_size(blob: *const osrmc_blob_t) -> usize {
    if blob.is_null() {
        return 0;
    }
    osrmc_blob_t::as_internal(blob).len()
}

/// Destroy a blob
///
/// # Safety
/// * `blob` must be NULL or a live blob handle, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_blob_destruct(blob: *mut osrmc_blob_t) {
    if !blob.is_null() {
        drop(osrmc_blob_t::into_internal(blob));
    }
}
