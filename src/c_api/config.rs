//! Configuration handles

use super::error::osrmc_error_t;
use super::{
    c_str, catch_panic, check_handle, opt_c_str, osrmc_algorithm_t, OSRMC_ALGORITHM_CH,
    OSRMC_ALGORITHM_MLD,
};
use crate::config::{Algorithm, Config, FeatureDataset};
use crate::engine::native::{osrmc_engine_vtable_t, NativeLoader};
use crate::error::Error;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::path::PathBuf;
use std::ptr;
use std::sync::Arc;

/// Opaque configuration handle
#[repr(C)]
pub struct osrmc_config_t {
    _private: [u8; 0],
}

impl osrmc_config_t {
    fn from_internal(internal: Box<Config>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<Config> {
        Box::from_raw(ptr as *mut Config)
    }

    pub(crate) unsafe fn as_internal<'a>(ptr: *const Self) -> &'a Config {
        &*(ptr as *const Config)
    }

    unsafe fn as_internal_mut<'a>(ptr: *mut Self) -> &'a mut Config {
        &mut *(ptr as *mut Config)
    }
}

/// Borrow a config handle for mutation, rejecting NULL
unsafe fn config_mut<'a>(config: *mut osrmc_config_t) -> crate::Result<&'a mut Config> {
    check_handle(config, "config")?;
    Ok(osrmc_config_t::as_internal_mut(config))
}

/// Create a configuration for a prepared dataset
///
/// Validates `<base_path>.fingerprint` but does not load the dataset.
///
/// # Parameters
/// * `base_path` - Dataset base path (e.g. "berlin.osrm"), or NULL to attach
///   to a dataset held in shared memory
/// * `error` - Error out-parameter
///
/// # Returns
/// * Configuration handle on success
/// * NULL with `CONFIG_INVALID` on failure
///
/// # Safety
/// * `base_path` must be NULL or a valid NUL-terminated string
///
/// # Example
/// ```c
/// osrmc_error_t *error = NULL;
/// osrmc_config_t *config = osrmc_config_construct("berlin.osrm", &error);
/// ```
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_construct(
    base_path: *const c_char,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_config_t {
    catch_panic!(error, ptr::null_mut(), {
        let config = if base_path.is_null() {
            Config::shared_memory()
        } else {
            let path = CStr::from_ptr(base_path)
                .to_str()
                .map_err(|_| Error::ConfigInvalid("dataset path is not valid UTF-8".to_string()))?;
            Config::new(path)?
        };
        Ok(osrmc_config_t::from_internal(Box::new(config)))
    })
}

/// Destroy a configuration
///
/// Safe to call right after `osrmc_osrm_construct`; the engine keeps what it
/// needs.
///
/// # Safety
/// * `config` must be NULL or a live configuration, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_destruct(config: *mut osrmc_config_t) {
    if !config.is_null() {
        drop(osrmc_config_t::into_internal(config));
    }
}

/// Link the routing engine through a host vtable
///
/// The vtable is copied; `load`, `query` and `release` must be non-NULL.
///
/// # Safety
/// * `config` must be a live configuration
/// * `vtable` must point to a valid vtable whose functions and `user_data`
///   stay usable for the lifetime of every engine loaded from `config`
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_engine(
    config: *mut osrmc_config_t,
    vtable: *const osrmc_engine_vtable_t,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        check_handle(vtable, "engine vtable")?;
        let loader = NativeLoader::new(*vtable)?;
        config.set_loader(Arc::new(loader));
        Ok(())
    })
}

/// Select the routing algorithm (`OSRMC_ALGORITHM_CH` or `OSRMC_ALGORITHM_MLD`)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_algorithm(
    config: *mut osrmc_config_t,
    algorithm: osrmc_algorithm_t,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        let algorithm = match algorithm {
            OSRMC_ALGORITHM_CH => Algorithm::Ch,
            OSRMC_ALGORITHM_MLD => Algorithm::Mld,
            other => return Err(Error::invalid(format!("unknown algorithm {}", other))),
        };
        config.set_algorithm(algorithm);
        Ok(())
    })
}

/// Maximum locations for trip queries (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_locations_trip(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_locations_trip(value) })
}

/// Maximum locations for route queries (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_locations_viaroute(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_locations_viaroute(value) })
}

/// Maximum locations for table queries (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_locations_distance_table(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_locations_distance_table(value) })
}

/// Maximum locations for match queries (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_locations_map_matching(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_locations_map_matching(value) })
}

/// Maximum match search radius in meters (-1.0 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_radius_map_matching(
    config: *mut osrmc_config_t,
    value: f64,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_radius_map_matching(value) })
}

/// Maximum nearest results (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_results_nearest(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_results_nearest(value) })
}

/// Default snapping radius in meters (-1.0 for the engine default)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_default_radius(
    config: *mut osrmc_config_t,
    value: f64,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_default_radius(value) })
}

/// Maximum alternative routes (-1 for unlimited)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_max_alternatives(
    config: *mut osrmc_config_t,
    value: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), { config_mut(config)?.set_max_alternatives(value) })
}

/// Memory-map dataset files (non-zero enables)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_use_mmap(
    config: *mut osrmc_config_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        config_mut(config)?.set_use_mmap(on != 0);
        Ok(())
    })
}

/// Attach to a shared-memory dataset (non-zero enables)
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_use_shared_memory(
    config: *mut osrmc_config_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        config_mut(config)?.set_use_shared_memory(on != 0);
        Ok(())
    })
}

/// Name of the shared-memory dataset; NULL clears
///
/// # Safety
/// * `config` must be a live configuration
/// * `name` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_dataset_name(
    config: *mut osrmc_config_t,
    name: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        let name = opt_c_str(name, "dataset name")?;
        config.set_dataset_name(name.map(str::to_string));
        Ok(())
    })
}

/// Backing file for the dataset; NULL clears
///
/// # Safety
/// * `config` must be a live configuration
/// * `path` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_memory_file(
    config: *mut osrmc_config_t,
    path: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        let path = opt_c_str(path, "memory file")?;
        config.set_memory_file(path.map(PathBuf::from));
        Ok(())
    })
}

/// Engine log verbosity; NULL clears
///
/// # Safety
/// * `config` must be a live configuration
/// * `verbosity` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_set_verbosity(
    config: *mut osrmc_config_t,
    verbosity: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        let verbosity = opt_c_str(verbosity, "verbosity")?;
        config.set_verbosity(verbosity.map(str::to_string));
        Ok(())
    })
}

/// Skip loading an optional dataset section ("ROUTE_STEPS" or "ROUTE_GEOMETRY")
///
/// # Safety
/// * `config` must be a live configuration
/// * `name` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_disable_feature_dataset(
    config: *mut osrmc_config_t,
    name: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        let config = config_mut(config)?;
        let dataset: FeatureDataset = c_str(name, "feature dataset")?.parse()?;
        config.disable_feature_dataset(dataset);
        Ok(())
    })
}

/// Load every optional dataset section again
///
/// # Safety
/// * `config` must be a live configuration
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_clear_disabled_feature_datasets(
    config: *mut osrmc_config_t,
    error: *mut *mut osrmc_error_t,
) {
    catch_panic!(error, (), {
        config_mut(config)?.clear_disabled_feature_datasets();
        Ok(())
    })
}
