//! C API tests driving a mock engine through the host vtable
//!
//! These follow the call sequences a C program makes: build a configuration,
//! install the engine, load it, run queries and release every handle.

use osrmc::c_api::blob::*;
use osrmc::c_api::config::*;
use osrmc::c_api::error::*;
use osrmc::c_api::params::*;
use osrmc::c_api::service::*;
use osrmc::c_api::{OSRMC_FORMAT_BINARY, OSRMC_FORMAT_JSON, OSRMC_SERVICE_ROUTE};
use osrmc::engine::native::{osrmc_engine_buffer_t, osrmc_engine_vtable_t, OSRMC_ENGINE_OK};
use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_int;
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};

const TILE_BYTES: &[u8] = b"\x1a\x02mvt\x00tile";

#[derive(Default)]
struct MockEngine {
    queries: AtomicUsize,
    releases: AtomicUsize,
    unloads: AtomicUsize,
}

unsafe fn fill(out: *mut osrmc_engine_buffer_t, bytes: Vec<u8>) {
    let owned = Box::new(bytes);
    (*out).data = owned.as_ptr();
    (*out).size = owned.len();
    (*out).token = Box::into_raw(owned) as *mut c_void;
}

unsafe extern "C" fn mock_load(
    user_data: *mut c_void,
    _config_json: *const u8,
    _config_len: usize,
    _out: *mut osrmc_engine_buffer_t,
) -> *mut c_void {
    user_data
}

unsafe extern "C" fn mock_query(
    user_data: *mut c_void,
    _instance: *mut c_void,
    service: c_int,
    params_json: *const u8,
    params_len: usize,
    out: *mut osrmc_engine_buffer_t,
) -> c_int {
    let engine = &*(user_data as *const MockEngine);
    engine.queries.fetch_add(1, Ordering::SeqCst);

    let request = slice::from_raw_parts(params_json, params_len);
    let doc: serde_json::Value = serde_json::from_slice(request).unwrap_or_default();
    let stranded = doc["coordinates"]
        .as_array()
        .is_some_and(|coords| coords.iter().any(|c| c[0] == 0.0 && c[1] == 0.0));
    if stranded {
        fill(out, br#"{"code":"NoRoute","message":"Impossible route between points"}"#.to_vec());
        return 1;
    }

    if service == osrmc::c_api::OSRMC_SERVICE_TILE {
        fill(out, TILE_BYTES.to_vec());
    } else {
        let body = serde_json::json!({
            "code": "Ok",
            "service": doc["service"],
            "routes": [{"distance": 1886.3, "duration": 260.9}],
        });
        fill(out, body.to_string().into_bytes());
    }
    OSRMC_ENGINE_OK
}

unsafe extern "C" fn mock_release(user_data: *mut c_void, buffer: *mut osrmc_engine_buffer_t) {
    let engine = &*(user_data as *const MockEngine);
    engine.releases.fetch_add(1, Ordering::SeqCst);
    if !(*buffer).token.is_null() {
        drop(Box::from_raw((*buffer).token as *mut Vec<u8>));
    }
}

unsafe extern "C" fn mock_unload(user_data: *mut c_void, _instance: *mut c_void) {
    let engine = &*(user_data as *const MockEngine);
    engine.unloads.fetch_add(1, Ordering::SeqCst);
}

fn vtable(engine: &MockEngine) -> osrmc_engine_vtable_t {
    osrmc_engine_vtable_t {
        user_data: engine as *const MockEngine as *mut c_void,
        load: Some(mock_load),
        query: Some(mock_query),
        release: Some(mock_release),
        unload: Some(mock_unload),
    }
}

/// Read and destroy an error, returning its code
unsafe fn take_code(err: &mut *mut osrmc_error_t) -> String {
    assert!(!err.is_null(), "expected an error");
    let code = CStr::from_ptr(osrmc_error_code(*err)).to_string_lossy().into_owned();
    osrmc_error_destruct(*err);
    *err = ptr::null_mut();
    code
}

unsafe fn blob_bytes(blob: *const osrmc_blob_t) -> Vec<u8> {
    slice::from_raw_parts(osrmc_blob_data(blob) as *const u8, osrmc_blob_size(blob)).to_vec()
}

unsafe fn load(engine: &MockEngine) -> *mut osrmc_osrm_t {
    let mut err: *mut osrmc_error_t = ptr::null_mut();
    let config = osrmc_config_construct(ptr::null(), &mut err);
    assert!(!config.is_null());
    osrmc_config_set_engine(config, &vtable(engine), &mut err);
    assert!(err.is_null());

    let osrm = osrmc_osrm_construct(config, &mut err);
    osrmc_config_destruct(config);
    assert!(err.is_null());
    assert!(!osrm.is_null());
    osrm
}

unsafe fn berlin_route() -> *mut osrmc_route_params_t {
    let mut err: *mut osrmc_error_t = ptr::null_mut();
    let params = osrmc_route_params_construct(&mut err);
    osrmc_params_add_coordinate(params, 13.388860, 52.517037, &mut err);
    osrmc_params_add_coordinate(params, 13.397634, 52.529407, &mut err);
    assert!(err.is_null());
    params
}

#[test]
fn test_route_round_trip() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let params = berlin_route();
        let mut err: *mut osrmc_error_t = ptr::null_mut();

        let response = osrmc_route(osrm, params, &mut err);
        assert!(err.is_null());
        assert!(!response.is_null());
        assert_eq!(osrmc_route_response_format(response, &mut err), OSRMC_FORMAT_JSON);
        assert_eq!(osrmc_route_response_blob_count(response, &mut err), 1);

        let json = osrmc_route_response_json(response, &mut err);
        let doc: serde_json::Value = serde_json::from_slice(&blob_bytes(json)).unwrap();
        assert_eq!(doc["code"], "Ok");
        assert_eq!(doc["service"], "route");
        assert!(doc["routes"].is_array());

        osrmc_blob_destruct(json);
        osrmc_route_response_destruct(response);
        osrmc_route_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
    assert_eq!(engine.queries.load(Ordering::SeqCst), 1);
    assert_eq!(engine.releases.load(Ordering::SeqCst), 1);
    assert_eq!(engine.unloads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_blob_survives_response_destruct() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let params = berlin_route();
        let mut err: *mut osrmc_error_t = ptr::null_mut();

        let response = osrmc_route(osrm, params, &mut err);
        let blob = osrmc_route_response_blob(response, &mut err);
        osrmc_route_response_destruct(response);
        osrmc_route_params_destruct(params);
        osrmc_osrm_destruct(osrm);

        let doc: serde_json::Value = serde_json::from_slice(&blob_bytes(blob)).unwrap();
        assert_eq!(doc["code"], "Ok");
        osrmc_blob_destruct(blob);
    }
}

#[test]
fn test_failure_leaves_result_null_and_sets_error() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let params = osrmc_route_params_construct(&mut err);
        osrmc_params_add_coordinate(params, 0.0, 0.0, &mut err);
        osrmc_params_add_coordinate(params, 13.397634, 52.529407, &mut err);

        let response = osrmc_route(osrm, params, &mut err);
        assert!(response.is_null());
        let message = CStr::from_ptr(osrmc_error_message(err)).to_str().unwrap().to_string();
        assert_eq!(take_code(&mut err), "NoRoute");
        assert!(message.contains("Impossible route"));

        osrmc_route_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
    // The error document is released like any other buffer
    assert_eq!(engine.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_too_few_coordinates_skips_engine() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let params = osrmc_table_params_construct(&mut err);

        let response = osrmc_table(osrm, params, &mut err);
        assert!(response.is_null());
        assert_eq!(take_code(&mut err), "TOO_FEW_COORDINATES");

        osrmc_table_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
    assert_eq!(engine.queries.load(Ordering::SeqCst), 0);
}

#[test]
fn test_route_params_on_tile_service() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let params = berlin_route();
        let mut err: *mut osrmc_error_t = ptr::null_mut();

        let response = osrmc_tile(osrm, params, &mut err);
        assert!(response.is_null());
        assert_eq!(take_code(&mut err), "WRONG_SERVICE_TYPE");

        osrmc_route_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
}

#[test]
fn test_tile_data_is_borrowed_view() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let params = osrmc_tile_params_construct(&mut err);
        osrmc_tile_params_set_x(params, 17602, &mut err);
        osrmc_tile_params_set_y(params, 10743, &mut err);
        osrmc_tile_params_set_z(params, 15, &mut err);
        assert!(err.is_null());

        let response = osrmc_tile(osrm, params, &mut err);
        assert!(err.is_null());
        assert_eq!(osrmc_tile_response_format(response, &mut err), OSRMC_FORMAT_BINARY);

        let mut size = 0usize;
        let data = osrmc_tile_response_data(response, &mut size, &mut err);
        assert_eq!(size, TILE_BYTES.len());
        assert_eq!(osrmc_tile_response_size(response, &mut err), size);
        assert_eq!(slice::from_raw_parts(data as *const u8, size), TILE_BYTES);

        // Same bytes every time, no copy
        let again = osrmc_tile_response_data(response, ptr::null_mut(), &mut err);
        assert_eq!(again, data);

        let json = osrmc_tile_response_json(response, &mut err);
        assert!(json.is_null());
        assert_eq!(take_code(&mut err), "FORMAT_UNSUPPORTED");

        osrmc_tile_response_destruct(response);
        osrmc_tile_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
}

#[test]
fn test_invalid_tile_rejected() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let params = osrmc_tile_params_construct(&mut err);
        osrmc_tile_params_set_z(params, 23, &mut err);

        assert!(osrmc_tile(osrm, params, &mut err).is_null());
        assert_eq!(take_code(&mut err), "INVALID_TILE");

        osrmc_tile_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
}

#[test]
fn test_response_accessor_of_other_service() {
    let engine = MockEngine::default();
    unsafe {
        let osrm = load(&engine);
        let params = berlin_route();
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let response = osrmc_route(osrm, params, &mut err);

        assert_eq!(osrmc_table_response_blob_count(response, &mut err), 0);
        assert_eq!(take_code(&mut err), "WRONG_SERVICE_TYPE");
        assert!(osrmc_tile_response_data(response, ptr::null_mut(), &mut err).is_null());
        assert_eq!(take_code(&mut err), "WRONG_SERVICE_TYPE");

        assert!(osrmc_route_response_blob_at(response, 3, &mut err).is_null());
        assert_eq!(take_code(&mut err), "INVALID_ARGUMENT");

        osrmc_route_response_destruct(response);
        osrmc_route_params_destruct(params);
        osrmc_osrm_destruct(osrm);
    }
}

#[test]
fn test_no_engine_linked() {
    unsafe {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let config = osrmc_config_construct(ptr::null(), &mut err);
        let osrm = osrmc_osrm_construct(config, &mut err);
        assert!(osrm.is_null());
        assert_eq!(take_code(&mut err), "ENGINE_LOAD_FAILED");
        osrmc_config_destruct(config);
    }
}

#[test]
fn test_incomplete_vtable_rejected() {
    let engine = MockEngine::default();
    unsafe {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let config = osrmc_config_construct(ptr::null(), &mut err);
        let mut table = vtable(&engine);
        table.release = None;

        osrmc_config_set_engine(config, &table, &mut err);
        assert_eq!(take_code(&mut err), "INVALID_ARGUMENT");
        osrmc_config_destruct(config);
    }
}

#[test]
fn test_missing_dataset_is_config_invalid() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = CString::new(dir.path().join("nowhere.osrm").to_str().unwrap()).unwrap();
    unsafe {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let config = osrmc_config_construct(path.as_ptr(), &mut err);
        assert!(config.is_null());
        assert_eq!(take_code(&mut err), "CONFIG_INVALID");
    }
}

#[test]
fn test_coordinate_out_of_range_leaves_params_unchanged() {
    unsafe {
        let mut err: *mut osrmc_error_t = ptr::null_mut();
        let params = osrmc_params_construct(OSRMC_SERVICE_ROUTE, &mut err);
        osrmc_params_add_coordinate(params, 181.0, 52.5, &mut err);
        assert_eq!(take_code(&mut err), "COORDINATE_OUT_OF_RANGE");
        assert_eq!(osrmc_params_coordinate_count(params, &mut err), 0);
        assert_eq!(osrmc_params_service(params, &mut err), OSRMC_SERVICE_ROUTE);
        osrmc_params_destruct(params);
    }
}

#[test]
fn test_null_error_slot_tolerated() {
    unsafe {
        let params = osrmc_route_params_construct(ptr::null_mut());
        osrmc_params_add_coordinate(params, 500.0, 0.0, ptr::null_mut());
        assert_eq!(osrmc_params_coordinate_count(params, ptr::null_mut()), 0);
        osrmc_route_params_destruct(params);
    }
}

#[test]
fn test_concurrent_queries_on_one_handle() {
    struct Shared(*mut osrmc_osrm_t);
    unsafe impl Send for Shared {}
    unsafe impl Sync for Shared {}
    impl Shared {
        fn get(&self) -> *mut osrmc_osrm_t {
            self.0
        }
    }

    let engine = MockEngine::default();
    let osrm = Shared(unsafe { load(&engine) });
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| unsafe {
                let params = berlin_route();
                for _ in 0..10 {
                    let mut err: *mut osrmc_error_t = ptr::null_mut();
                    let response = osrmc_route(osrm.get(), params, &mut err);
                    assert!(err.is_null());
                    osrmc_route_response_destruct(response);
                }
                osrmc_route_params_destruct(params);
            });
        }
    });
    unsafe { osrmc_osrm_destruct(osrm.get()) };

    assert_eq!(engine.queries.load(Ordering::SeqCst), 40);
    assert_eq!(engine.releases.load(Ordering::SeqCst), 40);
}
