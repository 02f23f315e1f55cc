//! Parameter object handles
//!
//! Every service shares one handle type, `osrmc_params_t`; the per-service
//! names (`osrmc_route_params_t`, ...) are aliases that document intent.
//! Common setters (`osrmc_params_*`) accept any parameter object; the
//! service-specific setters check the object's service and fail with
//! `WRONG_SERVICE_TYPE` otherwise.
//!
//! # Example
//! ```c
//! osrmc_error_t *error = NULL;
//! osrmc_route_params_t *params = osrmc_route_params_construct(&error);
//! osrmc_params_add_coordinate(params, 13.388860, 52.517037, &error);
//! osrmc_params_add_coordinate(params, 13.397634, 52.529407, &error);
//! osrmc_route_params_add_steps(params, 1, &error);
//! osrmc_route_params_set_annotations(params, "duration,distance", &error);
//! ```

use super::error::osrmc_error_t;
use super::{
    c_str, catch_panic, check_handle, format_from_c, opt_c_str, osrmc_approach_t,
    osrmc_output_format_t, osrmc_service_t, osrmc_snapping_t, service_from_c,
    OSRMC_APPROACH_CURB, OSRMC_APPROACH_OPPOSITE, OSRMC_APPROACH_UNRESTRICTED,
    OSRMC_SNAPPING_ANY, OSRMC_SNAPPING_DEFAULT,
};
use crate::error::{Error, Result};
use crate::params::{
    Approach, Params, RouteAnnotations, RouteOptions, ServiceKind, Snapping, TableAnnotations,
};
use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;

/// Opaque parameter object handle
#[repr(C)]
pub struct osrmc_params_t {
    _private: [u8; 0],
}

/// Nearest parameters
pub type osrmc_nearest_params_t = osrmc_params_t;
/// Route parameters
pub type osrmc_route_params_t = osrmc_params_t;
/// Table parameters
pub type osrmc_table_params_t = osrmc_params_t;
/// Match parameters
pub type osrmc_match_params_t = osrmc_params_t;
/// Trip parameters
pub type osrmc_trip_params_t = osrmc_params_t;
/// Tile parameters
pub type osrmc_tile_params_t = osrmc_params_t;

impl osrmc_params_t {
    fn from_internal(internal: Box<Params>) -> *mut Self {
        Box::into_raw(internal) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<Params> {
        Box::from_raw(ptr as *mut Params)
    }

    pub(crate) unsafe fn as_internal<'a>(ptr: *const Self) -> &'a Params {
        &*(ptr as *const Params)
    }

    unsafe fn as_internal_mut<'a>(ptr: *mut Self) -> &'a mut Params {
        &mut *(ptr as *mut Params)
    }
}

unsafe fn construct(kind: ServiceKind, error: *mut *mut osrmc_error_t) -> *mut osrmc_params_t {
    catch_panic!(error, ptr::null_mut(), {
        Ok(osrmc_params_t::from_internal(Box::new(Params::new(kind))))
    })
}

/// Apply `f` to a parameter object, reporting failures through `error`
unsafe fn edit(
    params: *mut osrmc_params_t,
    error: *mut *mut osrmc_error_t,
    f: impl FnOnce(&mut Params) -> Result<()>,
) {
    catch_panic!(error, (), {
        check_handle(params, "params")?;
        f(osrmc_params_t::as_internal_mut(params))
    })
}

/// Apply `f` to the route options of a `kind` parameter object
unsafe fn edit_route(
    params: *mut osrmc_params_t,
    kind: ServiceKind,
    error: *mut *mut osrmc_error_t,
    f: impl FnOnce(&mut RouteOptions) -> Result<()>,
) {
    edit(params, error, |p| f(p.route_like_mut(kind)?))
}

fn annotations(tokens: Option<&str>) -> Result<Option<RouteAnnotations>> {
    tokens.map(RouteAnnotations::parse).transpose()
}

fn continue_straight(on: c_int) -> Option<bool> {
    (on >= 0).then_some(on != 0)
}

// ============================================================================
// COMMON PARAMETERS
// ============================================================================

/// Create a parameter object for a service (`OSRMC_SERVICE_*`)
///
/// # Returns
/// * Parameter handle on success
/// * NULL with `INVALID_ARGUMENT` for an unknown service
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_construct(
    service: osrmc_service_t,
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_params_t {
    match service_from_c(service) {
        Ok(kind) => construct(kind, error),
        Err(err) => {
            super::error::report(error, err);
            ptr::null_mut()
        }
    }
}

/// Destroy a parameter object of any service
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_destruct(params: *mut osrmc_params_t) {
    if !params.is_null() {
        drop(osrmc_params_t::into_internal(params));
    }
}

/// Service the parameter object was built for (`OSRMC_SERVICE_*`, -1 on error)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_service(
    params: *const osrmc_params_t,
    error: *mut *mut osrmc_error_t,
) -> osrmc_service_t {
    catch_panic!(error, -1, {
        check_handle(params, "params")?;
        Ok(osrmc_params_t::as_internal(params).kind().discriminant())
    })
}

/// Number of coordinates added so far
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_coordinate_count(
    params: *const osrmc_params_t,
    error: *mut *mut osrmc_error_t,
) -> usize {
    catch_panic!(error, 0, {
        check_handle(params, "params")?;
        Ok(osrmc_params_t::as_internal(params).coordinate_count())
    })
}

/// Append a WGS84 coordinate
///
/// Out-of-range or non-finite values fail with `COORDINATE_OUT_OF_RANGE`
/// and leave the coordinates unchanged.
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_coordinate(
    params: *mut osrmc_params_t,
    longitude: f64,
    latitude: f64,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.add_coordinate(longitude, latitude))
}

/// Append a coordinate with snapping radius and bearing
///
/// A negative `radius` leaves the radius unset; a negative `bearing` or
/// `range` leaves the bearing unset.
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_coordinate_with(
    params: *mut osrmc_params_t,
    longitude: f64,
    latitude: f64,
    radius: f64,
    bearing: c_int,
    range: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.add_coordinate_with(longitude, latitude, radius, bearing, range)
    })
}

/// Set or clear (NULL) the base64 hint of a coordinate
///
/// # Safety
/// * `params` must be a live parameter object
/// * `hint` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_hint(
    params: *mut osrmc_params_t,
    coordinate_index: usize,
    hint: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.set_hint(coordinate_index, opt_c_str(hint, "hint")?)
    })
}

/// Set the snapping radius of a coordinate (negative clears)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_radius(
    params: *mut osrmc_params_t,
    coordinate_index: usize,
    radius: f64,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.set_radius(coordinate_index, radius))
}

/// Set the bearing restriction of a coordinate (negative clears)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_bearing(
    params: *mut osrmc_params_t,
    coordinate_index: usize,
    value: c_int,
    range: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.set_bearing(coordinate_index, value, range))
}

/// Set the approach side of a coordinate (`OSRMC_APPROACH_*`)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_approach(
    params: *mut osrmc_params_t,
    coordinate_index: usize,
    approach: osrmc_approach_t,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let approach = match approach {
            OSRMC_APPROACH_CURB => Approach::Curb,
            OSRMC_APPROACH_UNRESTRICTED => Approach::Unrestricted,
            OSRMC_APPROACH_OPPOSITE => Approach::Opposite,
            other => return Err(Error::invalid(format!("unknown approach {}", other))),
        };
        p.set_approach(coordinate_index, Some(approach))
    })
}

/// Exclude a road class such as "motorway" or "toll"
///
/// # Safety
/// * `params` must be a live parameter object
/// * `exclude` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_exclude(
    params: *mut osrmc_params_t,
    exclude: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.add_exclude(c_str(exclude, "exclude")?))
}

/// Whether responses carry hints (non-zero enables)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_generate_hints(
    params: *mut osrmc_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.set_generate_hints(on != 0);
        Ok(())
    })
}

/// Whether responses omit waypoints (non-zero enables)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_skip_waypoints(
    params: *mut osrmc_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.set_skip_waypoints(on != 0);
        Ok(())
    })
}

/// Snapping mode (`OSRMC_SNAPPING_*`)
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_snapping(
    params: *mut osrmc_params_t,
    snapping: osrmc_snapping_t,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let snapping = match snapping {
            OSRMC_SNAPPING_DEFAULT => Snapping::Default,
            OSRMC_SNAPPING_ANY => Snapping::Any,
            other => return Err(Error::invalid(format!("unknown snapping {}", other))),
        };
        p.set_snapping(snapping);
        Ok(())
    })
}

/// Select the output format (`OSRMC_FORMAT_*`)
///
/// `OSRMC_FORMAT_BINARY` is only accepted by tile parameters; elsewhere it
/// fails with `FORMAT_UNSUPPORTED`.
///
/// # Safety
/// * `params` must be a live parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_format(
    params: *mut osrmc_params_t,
    format: osrmc_output_format_t,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.set_format(format_from_c(format)?))
}

// ============================================================================
// NEAREST
// ============================================================================

/// Create nearest parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_nearest_params_t {
    construct(ServiceKind::Nearest, error)
}

/// Destroy nearest parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_params_destruct(params: *mut osrmc_nearest_params_t) {
    osrmc_params_destruct(params)
}

/// Number of candidates to return (at least 1)
///
/// # Safety
/// * `params` must be a live nearest parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_set_number_of_results(
    params: *mut osrmc_nearest_params_t,
    count: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.nearest_mut()?.set_number_of_results(count))
}

// ============================================================================
// ROUTE
// ============================================================================

/// Create route parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_route_params_t {
    construct(ServiceKind::Route, error)
}

/// Destroy route parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_destruct(params: *mut osrmc_route_params_t) {
    osrmc_params_destruct(params)
}

/// Return turn-by-turn steps (non-zero enables)
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_add_steps(
    params: *mut osrmc_route_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_steps(on != 0);
        Ok(())
    })
}

/// Search for alternatives (non-zero enables)
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_add_alternatives(
    params: *mut osrmc_route_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_alternatives(on != 0);
        Ok(())
    })
}

/// Geometry encoding: "polyline", "polyline6" or "geojson"
///
/// # Safety
/// * `params` must be a live route parameter object
/// * `geometries` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_set_geometries(
    params: *mut osrmc_route_params_t,
    geometries: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_geometries(c_str(geometries, "geometries")?.parse()?);
        Ok(())
    })
}

/// Overview level: "simplified", "full", "false" or "none"
///
/// # Safety
/// * `params` must be a live route parameter object
/// * `overview` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_set_overview(
    params: *mut osrmc_route_params_t,
    overview: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_overview(c_str(overview, "overview")?.parse()?);
        Ok(())
    })
}

/// Force straight continuation at waypoints (negative restores the engine default)
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_set_continue_straight(
    params: *mut osrmc_route_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_continue_straight(continue_straight(on));
        Ok(())
    })
}

/// Number of alternatives to search for; 0 disables alternatives
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_set_number_of_alternatives(
    params: *mut osrmc_route_params_t,
    count: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_number_of_alternatives(count);
        Ok(())
    })
}

/// Annotations as tokens separated by ',' or '|'; NULL disables
///
/// Tokens: none, duration, distance, weight, speed, nodes, datasources, all.
///
/// # Safety
/// * `params` must be a live route parameter object
/// * `annotations` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_set_annotations(
    params: *mut osrmc_route_params_t,
    annotations: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.set_annotations(self::annotations(opt_c_str(annotations, "annotations")?)?);
        Ok(())
    })
}

/// Treat the coordinate at `index` as a leg-separating waypoint
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_add_waypoint(
    params: *mut osrmc_route_params_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.add_waypoint(index);
        Ok(())
    })
}

/// Treat every coordinate as a waypoint again
///
/// # Safety
/// * `params` must be a live route parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_clear_waypoints(
    params: *mut osrmc_route_params_t,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Route, error, |r| {
        r.clear_waypoints();
        Ok(())
    })
}

// ============================================================================
// TABLE
// ============================================================================

/// Create table parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_table_params_t {
    construct(ServiceKind::Table, error)
}

/// Destroy table parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_destruct(params: *mut osrmc_table_params_t) {
    osrmc_params_destruct(params)
}

/// Use the coordinate at `index` as a matrix row
///
/// # Safety
/// * `params` must be a live table parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_add_source(
    params: *mut osrmc_table_params_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.table_mut()?.add_source(index);
        Ok(())
    })
}

/// Use the coordinate at `index` as a matrix column
///
/// # Safety
/// * `params` must be a live table parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_add_destination(
    params: *mut osrmc_table_params_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.table_mut()?.add_destination(index);
        Ok(())
    })
}

/// Matrices to compute: tokens "duration", "distance", "all" or "none"
/// separated by ',' or '|'; NULL restores durations only
///
/// # Safety
/// * `params` must be a live table parameter object
/// * `annotations` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_set_annotations_mask(
    params: *mut osrmc_table_params_t,
    annotations: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let mask = opt_c_str(annotations, "annotations")?
            .map(TableAnnotations::parse)
            .transpose()?;
        p.table_mut()?.set_annotations(mask);
        Ok(())
    })
}

/// Crow-fly speed in m/s for unreachable cells (must be positive)
///
/// # Safety
/// * `params` must be a live table parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_set_fallback_speed(
    params: *mut osrmc_table_params_t,
    speed: f64,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.table_mut()?.set_fallback_speed(speed))
}

/// Coordinate used for fallback estimates: "input" or "snapped"
///
/// # Safety
/// * `params` must be a live table parameter object
/// * `coordinate_type` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_set_fallback_coordinate_type(
    params: *mut osrmc_table_params_t,
    coordinate_type: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let coordinate = c_str(coordinate_type, "fallback coordinate type")?.parse()?;
        p.table_mut()?.set_fallback_coordinate(coordinate);
        Ok(())
    })
}

/// Multiplier applied to durations (must be positive)
///
/// # Safety
/// * `params` must be a live table parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_set_scale_factor(
    params: *mut osrmc_table_params_t,
    factor: f64,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| p.table_mut()?.set_scale_factor(factor))
}

// ============================================================================
// MATCH
// ============================================================================

/// Create match parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_match_params_t {
    construct(ServiceKind::Match, error)
}

/// Destroy match parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_destruct(params: *mut osrmc_match_params_t) {
    osrmc_params_destruct(params)
}

/// Return turn-by-turn steps (non-zero enables)
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_add_steps(
    params: *mut osrmc_match_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_steps(on != 0);
        Ok(())
    })
}

/// Search for alternatives (non-zero enables)
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_add_alternatives(
    params: *mut osrmc_match_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_alternatives(on != 0);
        Ok(())
    })
}

/// Geometry encoding: "polyline", "polyline6" or "geojson"
///
/// # Safety
/// * `params` must be a live match parameter object
/// * `geometries` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_geometries(
    params: *mut osrmc_match_params_t,
    geometries: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_geometries(c_str(geometries, "geometries")?.parse()?);
        Ok(())
    })
}

/// Overview level: "simplified", "full", "false" or "none"
///
/// # Safety
/// * `params` must be a live match parameter object
/// * `overview` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_overview(
    params: *mut osrmc_match_params_t,
    overview: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_overview(c_str(overview, "overview")?.parse()?);
        Ok(())
    })
}

/// Force straight continuation at waypoints (negative restores the engine default)
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_continue_straight(
    params: *mut osrmc_match_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_continue_straight(continue_straight(on));
        Ok(())
    })
}

/// Number of alternatives to search for; 0 disables alternatives
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_number_of_alternatives(
    params: *mut osrmc_match_params_t,
    count: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_number_of_alternatives(count);
        Ok(())
    })
}

/// Annotations as tokens separated by ',' or '|'; NULL disables
///
/// Tokens: none, duration, distance, weight, speed, nodes, datasources, all.
///
/// # Safety
/// * `params` must be a live match parameter object
/// * `annotations` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_annotations(
    params: *mut osrmc_match_params_t,
    annotations: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.set_annotations(self::annotations(opt_c_str(annotations, "annotations")?)?);
        Ok(())
    })
}

/// Treat the coordinate at `index` as a leg-separating waypoint
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_add_waypoint(
    params: *mut osrmc_match_params_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.add_waypoint(index);
        Ok(())
    })
}

/// Treat every coordinate as a waypoint again
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_clear_waypoints(
    params: *mut osrmc_match_params_t,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Match, error, |r| {
        r.clear_waypoints();
        Ok(())
    })
}

/// Append the UNIX timestamp of the next trace point
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_add_timestamp(
    params: *mut osrmc_match_params_t,
    timestamp: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.match_mut()?.add_timestamp(u64::from(timestamp));
        Ok(())
    })
}

/// Gap handling: "split" or "ignore"
///
/// # Safety
/// * `params` must be a live match parameter object
/// * `gaps` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_gaps(
    params: *mut osrmc_match_params_t,
    gaps: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let gaps = c_str(gaps, "gaps")?.parse()?;
        p.match_mut()?.set_gaps(gaps);
        Ok(())
    })
}

/// Remove redundant trace points before matching (non-zero enables)
///
/// # Safety
/// * `params` must be a live match parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_set_tidy(
    params: *mut osrmc_match_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.match_mut()?.set_tidy(on != 0);
        Ok(())
    })
}

// ============================================================================
// TRIP
// ============================================================================

/// Create trip parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_trip_params_t {
    construct(ServiceKind::Trip, error)
}

/// Destroy trip parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_destruct(params: *mut osrmc_trip_params_t) {
    osrmc_params_destruct(params)
}

/// Return turn-by-turn steps (non-zero enables)
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_steps(
    params: *mut osrmc_trip_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_steps(on != 0);
        Ok(())
    })
}

/// Search for alternatives (non-zero enables)
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_alternatives(
    params: *mut osrmc_trip_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_alternatives(on != 0);
        Ok(())
    })
}

/// Geometry encoding: "polyline", "polyline6" or "geojson"
///
/// # Safety
/// * `params` must be a live trip parameter object
/// * `geometries` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_set_geometries(
    params: *mut osrmc_trip_params_t,
    geometries: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_geometries(c_str(geometries, "geometries")?.parse()?);
        Ok(())
    })
}

/// Overview level: "simplified", "full", "false" or "none"
///
/// # Safety
/// * `params` must be a live trip parameter object
/// * `overview` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_set_overview(
    params: *mut osrmc_trip_params_t,
    overview: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_overview(c_str(overview, "overview")?.parse()?);
        Ok(())
    })
}

/// Force straight continuation at waypoints (negative restores the engine default)
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_set_continue_straight(
    params: *mut osrmc_trip_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_continue_straight(continue_straight(on));
        Ok(())
    })
}

/// Number of alternatives to search for; 0 disables alternatives
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_set_number_of_alternatives(
    params: *mut osrmc_trip_params_t,
    count: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_number_of_alternatives(count);
        Ok(())
    })
}

/// Annotations as tokens separated by ',' or '|'; NULL disables
///
/// Tokens: none, duration, distance, weight, speed, nodes, datasources, all.
///
/// # Safety
/// * `params` must be a live trip parameter object
/// * `annotations` must be NULL or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_set_annotations(
    params: *mut osrmc_trip_params_t,
    annotations: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.set_annotations(self::annotations(opt_c_str(annotations, "annotations")?)?);
        Ok(())
    })
}

/// Treat the coordinate at `index` as a leg-separating waypoint
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_waypoint(
    params: *mut osrmc_trip_params_t,
    index: usize,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.add_waypoint(index);
        Ok(())
    })
}

/// Treat every coordinate as a waypoint again
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_clear_waypoints(
    params: *mut osrmc_trip_params_t,
    error: *mut *mut osrmc_error_t,
) {
    edit_route(params, ServiceKind::Trip, error, |r| {
        r.clear_waypoints();
        Ok(())
    })
}

/// Return to the start (non-zero enables)
///
/// # Safety
/// * `params` must be a live trip parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_roundtrip(
    params: *mut osrmc_trip_params_t,
    on: c_int,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.trip_mut()?.set_roundtrip(on != 0);
        Ok(())
    })
}

/// Start constraint: "first" or "any"
///
/// # Safety
/// * `params` must be a live trip parameter object
/// * `source` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_source(
    params: *mut osrmc_trip_params_t,
    source: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let source = c_str(source, "trip source")?.parse()?;
        p.trip_mut()?.set_source(source);
        Ok(())
    })
}

/// End constraint: "last" or "any"
///
/// # Safety
/// * `params` must be a live trip parameter object
/// * `destination` must be a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn osrmc_trip_params_add_destination(
    params: *mut osrmc_trip_params_t,
    destination: *const c_char,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        let destination = c_str(destination, "trip destination")?.parse()?;
        p.trip_mut()?.set_destination(destination);
        Ok(())
    })
}

// ============================================================================
// TILE
// ============================================================================

/// Create tile parameters
///
/// # Safety
/// * `error` must be NULL or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_params_construct(
    error: *mut *mut osrmc_error_t,
) -> *mut osrmc_tile_params_t {
    construct(ServiceKind::Tile, error)
}

/// Destroy tile parameters
///
/// # Safety
/// * `params` must be NULL or a live parameter object, destroyed only once
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_params_destruct(params: *mut osrmc_tile_params_t) {
    osrmc_params_destruct(params)
}

/// Tile column
///
/// The triple is validated when the tile service is invoked.
///
/// # Safety
/// * `params` must be a live tile parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_params_set_x(
    params: *mut osrmc_tile_params_t,
    x: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.tile_mut()?.x = x;
        Ok(())
    })
}

/// Tile row
///
/// The triple is validated when the tile service is invoked.
///
/// # Safety
/// * `params` must be a live tile parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_params_set_y(
    params: *mut osrmc_tile_params_t,
    y: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.tile_mut()?.y = y;
        Ok(())
    })
}

/// Zoom level (at most 22)
///
/// The triple is validated when the tile service is invoked.
///
/// # Safety
/// * `params` must be a live tile parameter object
#[no_mangle]
pub unsafe extern "C" fn osrmc_tile_params_set_z(
    params: *mut osrmc_tile_params_t,
    z: c_uint,
    error: *mut *mut osrmc_error_t,
) {
    edit(params, error, |p| {
        p.tile_mut()?.z = z;
        Ok(())
    })
}
