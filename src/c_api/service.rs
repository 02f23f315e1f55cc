//! Engine handles, service invocation and responses
//!
//! Each service has its own entry point (`osrmc_route`, `osrmc_table`, ...)
//! and its own response accessors. All response types share one layout;
//! calling an accessor of one service on another service's response fails
//! with `WRONG_SERVICE_TYPE`.
//!
//! Blobs returned by the accessors are copies owned by the caller. They stay
//! valid after the response is destroyed.
//!
//! # Example
//! ```c
//! osrmc_route_response_t *response = osrmc_route(osrm, params, &error);
//! if (response) {
//!     osrmc_blob_t *json = osrmc_route_response_json(response, &error);
//!     osrmc_route_response_destruct(response);
//!     fwrite(osrmc_blob_data(json), 1, osrmc_blob_size(json), stdout);
//!     osrmc_blob_destruct(json);
//! }
//! ```

use super::blob::osrmc_blob_t;
use super::config::osrmc_config_t;
use super::error::osrmc_error_t;
use super::params::{
    osrmc_match_params_t, osrmc_nearest_params_t, osrmc_params_t, osrmc_route_params_t,
    osrmc_table_params_t, osrmc_tile_params_t, osrmc_trip_params_t,
};
use super::{catch_panic, check_handle, format_to_c, osrmc_output_format_t};
use crate::blob::Blob;
use crate::error::Result;
use crate::osrm::Osrm;
use crate::params::ServiceKind;
use crate::response::Response;
use std::os::raw::c_char;
use std::ptr;

/// Opaque engine instance handle
#[repr(C)]
pub struct osrmc_osrm_t {
    _private: [u8; 0],
}

/// Opaque response handle
#[repr(C)]
pub struct osrmc_response_t {
    _private: [u8; 0],
}

/// Nearest response
pub type osrmc_nearest_response_t = osrmc_response_t;
/// Route response
pub type osrmc_route_response_t = osrmc_response_t;
/// Table response
pub type osrmc_table_response_t = osrmc_response_t;
/// Match response
pub type osrmc_match_response_t = osrmc_response_t;
/// Trip response
pub type osrmc_trip_response_t = osrmc_response_t;
/// Tile response
pub type osrmc_tile_response_t = osrmc_response_t;

impl osrmc_osrm_t {
    fn from_internal(internal: Box<Osrm>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<Osrm> {
        Box::from_raw(ptr as *mut Osrm)
    }

    unsafe fn as_internal<'a>(ptr: *const Self) -> &'a Osrm {
        &*(ptr as *const Osrm)
    }
}

impl osrmc_response_t {
    fn from_internal(internal: Box<Response>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<Response> {
        Box::from_raw(ptr as *mut Response)
    }

    unsafe fn as_internal<'a>(ptr: *const Self) -> &'a Response {
        &*(ptr as *const Response)
    }
}

// ============================================================================
// ENGINE INSTANCE
// ============================================================================

/// Load the routing engine for a configuration
///
/// The configuration may be destroyed as soon as this returns. The engine
/// instance is thread-safe: several threads may run queries on it at once.
///
/// # Returns
/// * Engine handle on success
/// * NULL with `ENGINE_LOAD_FAILED` if no engine is linked or loading fails
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_osrm_construct(
    config: *const osrmc_config_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_osrm_t {
    catch_panic!(error, ptr::null_mut(), {
        check_handle(config, "config")?;
        let osrm = Osrm::new(osrmc_config_t::as_internal(config))?;
        Ok(osrmc_osrm_t::from_internal(Box::new(osrm)))
    })
}

/// Destroy an engine instance
///
/// # Safety
/// * `osrm` must be NULL or a live engine handle with no query in flight,
///   destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_osrm_destruct(osrm: *mut osrmc_osrm_t) {
    if !osrm.is_null() {
        drop(osrmc_osrm_t::into_internal(osrm));
    }
}

// ============================================================================
// SHARED IMPLEMENTATION
// ============================================================================

unsafe fn invoke(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_params_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_response_t {
    catch_panic!(error, ptr::null_mut(), {
        check_handle(osrm, "osrm")?;
        check_handle(params, "params")?;
        let osrm = osrmc_osrm_t::as_internal(osrm);
        let response = osrm.invoke(kind, osrmc_params_t::as_internal(params))?;
        Ok(osrmc_response_t::from_internal(Box::new(response)))
    })
}

unsafe fn response<'a>(response: *const osrmc_response_t, kind: ServiceKind) -> Result<&'a Response> {
    check_handle(response, "response")?;
    osrmc_response_t::as_internal(response).expect_service(kind)
}

fn into_handle(blob: Blob) -> *mut osrmc_blob_t {
    osrmc_blob_t::from_internal(Box::new(blob))
}

unsafe fn destruct(resp: *mut osrmc_response_t) {
    if !resp.is_null() {
        drop(osrmc_response_t::into_internal(resp));
    }
}

unsafe fn blob(
    resp: *const osrmc_response_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    catch_panic!(error, ptr::null_mut(), {
        Ok(into_handle(response(resp, kind)?.blob()))
    })
}

unsafe fn blob_count(
    resp: *const osrmc_response_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
) -> usize {
    catch_panic!(error, 0, { Ok(response(resp, kind)?.blob_count()) })
}

unsafe fn blob_at(
    resp: *const osrmc_response_t,
    kind: ServiceKind,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    catch_panic!(error, ptr::null_mut(), {
        Ok(into_handle(response(resp, kind)?.blob_at(index)?))
    })
}

unsafe fn json(
    resp: *const osrmc_response_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    catch_panic!(error, ptr::null_mut(), {
        Ok(into_handle(response(resp, kind)?.json()?))
    })
}

unsafe fn format(
    resp: *const osrmc_response_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    catch_panic!(error, -1, { Ok(format_to_c(response(resp, kind)?.format())) })
}

// ============================================================================
// NEAREST
// ============================================================================

/// Snap a coordinate to the road network
///
/// Requires at least 1 coordinate. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// # Returns
/// * Response handle on success (release with `osrmc_nearest_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_nearest_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_nearest_response_t {
    invoke(osrm, params, ServiceKind::Nearest, error)
}

/// Destroy a nearest response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_destruct(response: *mut osrmc_nearest_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live nearest response
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_blob(
    response: *const osrmc_nearest_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Nearest, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live nearest response
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_blob_count(
    response: *const osrmc_nearest_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Nearest, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live nearest response
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_blob_at(
    response: *const osrmc_nearest_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Nearest, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live nearest response
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_json(
    response: *const osrmc_nearest_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Nearest, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live nearest response
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_format(
    response: *const osrmc_nearest_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Nearest, error)
}

// ============================================================================
// ROUTE
// ============================================================================

/// Fastest route through the coordinates
///
/// Requires at least 2 coordinates. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// # Returns
/// * Response handle on success (release with `osrmc_route_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_route_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_route_response_t {
    invoke(osrm, params, ServiceKind::Route, error)
}

/// Destroy a route response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_destruct(response: *mut osrmc_route_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live route response
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_blob(
    response: *const osrmc_route_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Route, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live route response
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_blob_count(
    response: *const osrmc_route_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Route, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live route response
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_blob_at(
    response: *const osrmc_route_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Route, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live route response
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_json(
    response: *const osrmc_route_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Route, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live route response
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_format(
    response: *const osrmc_route_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Route, error)
}

// ============================================================================
// TABLE
// ============================================================================

/// Duration/distance matrix between the coordinates
///
/// Requires at least 1 coordinate. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// # Returns
/// * Response handle on success (release with `osrmc_table_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_table(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_table_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_table_response_t {
    invoke(osrm, params, ServiceKind::Table, error)
}

/// Destroy a table response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_destruct(response: *mut osrmc_table_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live table response
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_blob(
    response: *const osrmc_table_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Table, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live table response
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_blob_count(
    response: *const osrmc_table_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Table, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live table response
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_blob_at(
    response: *const osrmc_table_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Table, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live table response
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_json(
    response: *const osrmc_table_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Table, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live table response
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_format(
    response: *const osrmc_table_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Table, error)
}

// ============================================================================
// MATCH
// ============================================================================

/// Map-match a GPS trace onto the road network
///
/// Requires at least 2 coordinates. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// # Returns
/// * Response handle on success (release with `osrmc_match_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_match_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_match_response_t {
    invoke(osrm, params, ServiceKind::Match, error)
}

/// Destroy a match response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_destruct(response: *mut osrmc_match_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live match response
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_blob(
    response: *const osrmc_match_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Match, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live match response
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_blob_count(
    response: *const osrmc_match_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Match, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live match response
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_blob_at(
    response: *const osrmc_match_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Match, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live match response
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_json(
    response: *const osrmc_match_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Match, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live match response
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_format(
    response: *const osrmc_match_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Match, error)
}

// ============================================================================
// TRIP
// ============================================================================

/// Travelling salesman round trip through the coordinates
///
/// Requires at least 2 coordinates. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// # Returns
/// * Response handle on success (release with `osrmc_trip_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_trip_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_trip_response_t {
    invoke(osrm, params, ServiceKind::Trip, error)
}

/// Destroy a trip response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_destruct(response: *mut osrmc_trip_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live trip response
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_blob(
    response: *const osrmc_trip_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Trip, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live trip response
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_blob_count(
    response: *const osrmc_trip_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Trip, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live trip response
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_blob_at(
    response: *const osrmc_trip_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Trip, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live trip response
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_json(
    response: *const osrmc_trip_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Trip, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live trip response
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_response_format(
    response: *const osrmc_trip_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Trip, error)
}

// ============================================================================
// TILE
// ============================================================================

/// Vector tile of the routing graph
///
/// Requires a valid (x, y, z) triple. Structural problems are reported before the engine
/// runs; engine failures keep the engine's own code and message.
///
/// The format selector is forwarded to the engine unchanged; the payload is
/// always returned as a single binary blob.
///
/// # Returns
/// * Response handle on success (release with `osrmc_tile_response_destruct`)
/// * NULL on failure
///
/// # Safety
/// * `osrm` must be a live engine handle
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile(
    osrm: *const osrmc_osrm_t,
    params: *const osrmc_tile_params_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_tile_response_t {
    invoke(osrm, params, ServiceKind::Tile, error)
}

/// Destroy a tile response
///
/// Blobs extracted from it stay valid.
///
/// # Safety
/// * `response` must be NULL or a live response, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_destruct(response: *mut osrmc_tile_response_t) {
    destruct(response)
}

/// Copy of the primary payload
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_blob(
    response: *const osrmc_tile_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob(response, ServiceKind::Tile, error)
}

/// Number of payload blobs in the response
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_blob_count(
    response: *const osrmc_tile_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    blob_count(response, ServiceKind::Tile, error)
}

/// Copy of the payload at `index`
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_blob_at(
    response: *const osrmc_tile_response_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    blob_at(response, ServiceKind::Tile, index, error)
}

/// Copy of the payload as JSON text
///
/// Fails with `FORMAT_UNSUPPORTED` unless the query asked for JSON.
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_json(
    response: *const osrmc_tile_response_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_blob_t {
    json(response, ServiceKind::Tile, error)
}

/// Output format of the payload (`OSRMC_FORMAT_*`, -1 on error)
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_format(
    response: *const osrmc_tile_response_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_output_format_t {
    format(response, ServiceKind::Tile, error)
}

/// Borrow the tile bytes without copying
///
/// # Parameters
/// * `response` - Tile response
/// * `size` - Receives the byte length (may be NULL)
/// * `error` - Error out-parameter
///
/// # Returns
/// * Pointer valid until the response is destroyed
/// * NULL on failure
///
/// # Safety
/// * `response` must be a live tile response
/// * `size` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_data(
    response: *const osrmc_tile_response_t,
    size: *mut usize,
    error: *mut *mut osrmc_error_t,
) -> *const c_char {
    catch_panic!(error, ptr::null(), {
        let primary = self::response(response, ServiceKind::Tile)?.primary();
        if !size.is_null() {
            *size = primary.len();
        }
        Ok(primary.as_ptr() as *const c_char)
    })
}

/// Byte length of the tile
///
/// # Safety
/// * `response` must be a live tile response
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_response_size(
    response: *const osrmc_tile_response_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    catch_panic!(error, 0, {
        Ok(self::response(response, ServiceKind::Tile)?.primary().len())
    })
}
