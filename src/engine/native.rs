//! Native engine adapter
//!
//! A C host links the external engine by filling in an
//! [`osrmc_engine_vtable_t`] and installing it on a configuration with
//! `osrmc_config_set_engine`. Configurations and parameter objects cross
//! this seam as JSON documents; payloads come back in engine-owned
//! [`osrmc_engine_buffer_t`]s that the bridge copies and then releases.

#![allow(non_camel_case_types)]

use super::{Engine, EngineFailure, EngineLoader};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::params::{Params, ServiceKind};
use std::ffi::c_void;
use std::fmt;
use std::os::raw::c_int;
use std::ptr;
use std::slice;

/// Status returned by a successful `query`
pub const OSRMC_ENGINE_OK: c_int = 0;

/// Engine-owned output buffer
///
/// The engine sets `data`/`size` to the output bytes and may stash whatever
/// it needs to free them in `token`. The bridge never writes these fields
/// after the call returns; it hands the buffer back through `release`.
#[repr(C)]
#[derive(Debug)]
pub struct osrmc_engine_buffer_t {
    /// Output bytes, may be null when `size` is 0
    pub data: *const u8,
    /// Length of `data` in bytes
    pub size: usize,
    /// Engine-private release token
    pub token: *mut c_void,
}

impl osrmc_engine_buffer_t {
    fn empty() -> Self {
        osrmc_engine_buffer_t {
            data: ptr::null(),
            size: 0,
            token: ptr::null_mut(),
        }
    }

    fn is_set(&self) -> bool {
        !self.data.is_null() || !self.token.is_null()
    }

    /// # Safety
    /// `data` must be null or valid for `size` bytes
    unsafe fn to_vec(&self) -> Vec<u8> {
        if self.data.is_null() || self.size == 0 {
            return Vec::new();
        }
        slice::from_raw_parts(self.data, self.size).to_vec()
    }
}

/// Load a dataset; returns the engine instance or null with an error document in `out`
pub type osrmc_engine_load_fn = unsafe extern "C" fn(
    user_data: *mut c_void,
    config_json: *const u8,
    config_len: usize,
    out: *mut osrmc_engine_buffer_t,
) -> *mut c_void;

/// Run one query; returns [`OSRMC_ENGINE_OK`] with the payload in `out`, or
/// any other status with an error document in `out`
pub type osrmc_engine_query_fn = unsafe extern "C" fn(
    user_data: *mut c_void,
    instance: *mut c_void,
    service: c_int,
    params_json: *const u8,
    params_len: usize,
    out: *mut osrmc_engine_buffer_t,
) -> c_int;

/// Free a buffer previously filled by `load` or `query`
pub type osrmc_engine_release_fn =
    unsafe extern "C" fn(user_data: *mut c_void, buffer: *mut osrmc_engine_buffer_t);

/// Destroy an engine instance
pub type osrmc_engine_unload_fn = unsafe extern "C" fn(user_data: *mut c_void, instance: *mut c_void);

/// Host-provided engine entry points
///
/// `load`, `query` and `release` are required; `unload` is optional. The
/// host guarantees that `query` may be called concurrently from several
/// threads for the same instance.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct osrmc_engine_vtable_t {
    /// Passed back unchanged as the first argument of every call
    pub user_data: *mut c_void,
    /// Dataset loader
    pub load: Option<osrmc_engine_load_fn>,
    /// Query entry point
    pub query: Option<osrmc_engine_query_fn>,
    /// Buffer release
    pub release: Option<osrmc_engine_release_fn>,
    /// Instance teardown, called once
    pub unload: Option<osrmc_engine_unload_fn>,
}

#[derive(Clone, Copy)]
struct Entries {
    user_data: *mut c_void,
    load: osrmc_engine_load_fn,
    query: osrmc_engine_query_fn,
    release: osrmc_engine_release_fn,
    unload: Option<osrmc_engine_unload_fn>,
}

impl Entries {
    /// Copy the buffer out, then hand it back to the engine
    ///
    /// # Safety
    /// `buffer` must have been filled by this engine
    unsafe fn take(&self, buffer: &mut osrmc_engine_buffer_t) -> Vec<u8> {
        let bytes = buffer.to_vec();
        if buffer.is_set() {
            (self.release)(self.user_data, buffer);
        }
        bytes
    }
}

/// [`EngineLoader`] backed by a host vtable
pub struct NativeLoader {
    entries: Entries,
}

// SAFETY: the host promises the vtable and its user_data are usable from any thread
unsafe impl Send for NativeLoader {}
unsafe impl Sync for NativeLoader {}

impl NativeLoader {
    /// Wrap a vtable, rejecting one without its required entries
    pub fn new(vtable: osrmc_engine_vtable_t) -> Result<Self> {
        let (Some(load), Some(query), Some(release)) = (vtable.load, vtable.query, vtable.release)
        else {
            return Err(Error::invalid(
                "engine vtable requires load, query and release entries",
            ));
        };
        Ok(NativeLoader {
            entries: Entries {
                user_data: vtable.user_data,
                load,
                query,
                release,
                unload: vtable.unload,
            },
        })
    }
}

impl fmt::Debug for NativeLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLoader")
            .field("user_data", &self.entries.user_data)
            .field("unload", &self.entries.unload.is_some())
            .finish()
    }
}

impl EngineLoader for NativeLoader {
    fn load(&self, config: &Config) -> std::result::Result<Box<dyn Engine>, EngineFailure> {
        let document = config
            .to_json()
            .map_err(|e| EngineFailure::new(e.code(), e.to_string()))?;
        let mut out = osrmc_engine_buffer_t::empty();

        // SAFETY: the document outlives the call and `out` is a valid buffer
        let instance = unsafe {
            (self.entries.load)(
                self.entries.user_data,
                document.as_ptr(),
                document.len(),
                &mut out,
            )
        };
        // SAFETY: `out` was filled by this engine's load
        let bytes = unsafe { self.entries.take(&mut out) };

        if instance.is_null() {
            return Err(EngineFailure::from_document(&bytes));
        }
        Ok(Box::new(NativeEngine {
            entries: self.entries,
            instance,
        }))
    }
}

/// [`Engine`] instance created by a host vtable
struct NativeEngine {
    entries: Entries,
    instance: *mut c_void,
}

// SAFETY: the host promises concurrent queries on one instance are safe
unsafe impl Send for NativeEngine {}
unsafe impl Sync for NativeEngine {}

impl Engine for NativeEngine {
    fn query(
        &self,
        service: ServiceKind,
        params: &Params,
    ) -> std::result::Result<Vec<u8>, EngineFailure> {
        let document = params
            .to_json()
            .map_err(|e| EngineFailure::new(e.code(), e.to_string()))?;
        let mut out = osrmc_engine_buffer_t::empty();

        // SAFETY: instance came from load and has not been unloaded
        let status = unsafe {
            (self.entries.query)(
                self.entries.user_data,
                self.instance,
                service.discriminant() as c_int,
                document.as_ptr(),
                document.len(),
                &mut out,
            )
        };
        // SAFETY: `out` was filled by this engine's query
        let bytes = unsafe { self.entries.take(&mut out) };

        if status != OSRMC_ENGINE_OK {
            return Err(EngineFailure::from_document(&bytes));
        }
        Ok(bytes)
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        if let Some(unload) = self.entries.unload {
            log::debug!("unloading native engine instance {:p}", self.instance);
            // SAFETY: called exactly once, after the last query
            unsafe { unload(self.entries.user_data, self.instance) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counters {
        loads: AtomicUsize,
        releases: AtomicUsize,
        unloads: AtomicUsize,
    }

    const ROUTE_OK: &[u8] = br#"{"code":"Ok","routes":[]}"#;
    const NO_ROUTE: &[u8] = br#"{"code":"NoRoute","message":"Impossible route between points"}"#;

    unsafe extern "C" fn load(
        user_data: *mut c_void,
        _config: *const u8,
        _len: usize,
        _out: *mut osrmc_engine_buffer_t,
    ) -> *mut c_void {
        let counters = &*(user_data as *const Counters);
        counters.loads.fetch_add(1, Ordering::SeqCst);
        user_data
    }

    unsafe extern "C" fn failing_load(
        _user_data: *mut c_void,
        _config: *const u8,
        _len: usize,
        out: *mut osrmc_engine_buffer_t,
    ) -> *mut c_void {
        let msg = br#"{"code":"MissingData","message":"berlin.osrm.hsgr not found"}"#;
        (*out).data = msg.as_ptr();
        (*out).size = msg.len();
        ptr::null_mut()
    }

    unsafe extern "C" fn query(
        _user_data: *mut c_void,
        _instance: *mut c_void,
        service: c_int,
        params: *const u8,
        len: usize,
        out: *mut osrmc_engine_buffer_t,
    ) -> c_int {
        let request = slice::from_raw_parts(params, len);
        let doc: serde_json::Value = serde_json::from_slice(request).unwrap();
        let payload = if doc["coordinates"].as_array().map_or(0, Vec::len) > 2 {
            NO_ROUTE
        } else {
            ROUTE_OK
        };
        (*out).data = payload.as_ptr();
        (*out).size = payload.len();
        if payload == NO_ROUTE || service != ServiceKind::Route.discriminant() {
            1
        } else {
            OSRMC_ENGINE_OK
        }
    }

    unsafe extern "C" fn release(user_data: *mut c_void, _buffer: *mut osrmc_engine_buffer_t) {
        let counters = &*(user_data as *const Counters);
        counters.releases.fetch_add(1, Ordering::SeqCst);
    }

    unsafe extern "C" fn unload(user_data: *mut c_void, _instance: *mut c_void) {
        let counters = &*(user_data as *const Counters);
        counters.unloads.fetch_add(1, Ordering::SeqCst);
    }

    fn vtable(counters: &Counters) -> osrmc_engine_vtable_t {
        osrmc_engine_vtable_t {
            user_data: counters as *const Counters as *mut c_void,
            load: Some(load),
            query: Some(query),
            release: Some(release),
            unload: Some(unload),
        }
    }

    fn route(coords: usize) -> Params {
        let mut params = Params::new(ServiceKind::Route);
        for i in 0..coords {
            params.add_coordinate(13.38 + i as f64 * 0.01, 52.51).unwrap();
        }
        params
    }

    #[test]
    fn test_missing_entries_rejected() {
        let counters = Counters::default();
        let mut table = vtable(&counters);
        table.release = None;
        assert_eq!(NativeLoader::new(table).unwrap_err().code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_query_copies_and_releases() {
        let counters = Counters::default();
        let loader = NativeLoader::new(vtable(&counters)).unwrap();
        let engine = loader.load(&Config::shared_memory()).unwrap();
        assert_eq!(counters.loads.load(Ordering::SeqCst), 1);

        let bytes = engine.query(ServiceKind::Route, &route(2)).unwrap();
        assert_eq!(bytes, ROUTE_OK);
        assert_eq!(counters.releases.load(Ordering::SeqCst), 1);

        drop(engine);
        assert_eq!(counters.unloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_query_failure_document() {
        let counters = Counters::default();
        let loader = NativeLoader::new(vtable(&counters)).unwrap();
        let engine = loader.load(&Config::shared_memory()).unwrap();

        let failure = engine.query(ServiceKind::Route, &route(3)).unwrap_err();
        assert_eq!(failure.code, "NoRoute");
        assert_eq!(failure.message, "Impossible route between points");
        assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_load_failure() {
        let counters = Counters::default();
        let mut table = vtable(&counters);
        table.load = Some(failing_load);
        table.user_data = ptr::null_mut();
        table.release = Some(release_nothing);
        let loader = NativeLoader::new(table).unwrap();
        let failure = loader.load(&Config::shared_memory()).err().unwrap();
        assert_eq!(failure.code, "MissingData");
    }

    unsafe extern "C" fn release_nothing(_user_data: *mut c_void, _buffer: *mut osrmc_engine_buffer_t) {}
}
