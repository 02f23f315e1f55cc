//! Query parameter objects
//!
//! A [`Params`] is a tagged variant over the six services. Every variant
//! shares the common part ([`BaseParams`]: coordinates, output format and
//! per-coordinate snapping options); the service-specific part lives in
//! [`ServiceParams`]. Service-specific accessors check the tag and fail with
//! `WRONG_SERVICE_TYPE` instead of reinterpreting the object.
//!
//! Setters only perform checks that are meaningful on their own (coordinate
//! bounds, enum values, index bounds). Checks that depend on the complete
//! request, such as the minimum coordinate count, happen in
//! [`Params::validate_for`] when a service is invoked.
//!
//! # Example
//!
//! ```
//! use osrmc::params::{OutputFormat, Params, ServiceKind};
//!
//! let mut params = Params::new(ServiceKind::Route);
//! params.add_coordinate(13.388860, 52.517037)?;
//! params.add_coordinate(13.397634, 52.529407)?;
//! params.set_format(OutputFormat::Json)?;
//! params.route_like_mut(ServiceKind::Route)?.set_steps(true);
//! params.validate_for(ServiceKind::Route)?;
//! # Ok::<(), osrmc::Error>(())
//! ```

mod route;
mod table;
mod tile;

pub use route::{Gaps, Geometries, MatchParams, Overview, RouteAnnotations, RouteOptions, TripDestination, TripParams, TripSource};
pub use table::{FallbackCoordinate, TableAnnotations, TableParams};
pub use tile::{TileParams, MAX_TILE_ZOOM};

use crate::error::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The six services the engine answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Snap a coordinate to the network
    Nearest,
    /// Fastest route through the coordinates
    Route,
    /// Duration/distance matrix
    Table,
    /// Map-match a GPS trace
    Match,
    /// Travelling salesman tour
    Trip,
    /// Vector tile of the routing graph
    Tile,
}

impl ServiceKind {
    /// All services in discriminant order
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::Nearest,
        ServiceKind::Route,
        ServiceKind::Table,
        ServiceKind::Match,
        ServiceKind::Trip,
        ServiceKind::Tile,
    ];

    /// Lowercase service name
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Nearest => "nearest",
            ServiceKind::Route => "route",
            ServiceKind::Table => "table",
            ServiceKind::Match => "match",
            ServiceKind::Trip => "trip",
            ServiceKind::Tile => "tile",
        }
    }

    /// Minimum number of coordinates an invocation needs
    pub fn min_coordinates(self) -> usize {
        match self {
            ServiceKind::Nearest | ServiceKind::Table => 1,
            ServiceKind::Route | ServiceKind::Match | ServiceKind::Trip => 2,
            ServiceKind::Tile => 0,
        }
    }

    /// Stable numeric discriminant used across the C boundary
    pub fn discriminant(self) -> i32 {
        match self {
            ServiceKind::Nearest => 0,
            ServiceKind::Route => 1,
            ServiceKind::Table => 2,
            ServiceKind::Match => 3,
            ServiceKind::Trip => 4,
            ServiceKind::Tile => 5,
        }
    }

    /// Inverse of [`ServiceKind::discriminant`]
    pub fn from_discriminant(value: i32) -> Option<Self> {
        ServiceKind::ALL.into_iter().find(|k| k.discriminant() == value)
    }

    /// Whether the service shares the route option block
    pub fn is_route_like(self) -> bool {
        matches!(self, ServiceKind::Route | ServiceKind::Match | ServiceKind::Trip)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        ServiceKind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| Error::invalid(format!("unknown service '{}'", s)))
    }
}

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// UTF-8 JSON text
    Json,
    /// FlatBuffers binary
    Flatbuffers,
    /// Raw binary, tile service only
    Binary,
}

impl OutputFormat {
    /// Whether a service can produce this format
    pub fn is_supported_by(self, kind: ServiceKind) -> bool {
        match self {
            OutputFormat::Json | OutputFormat::Flatbuffers => true,
            OutputFormat::Binary => kind == ServiceKind::Tile,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "flatbuffers" => Ok(OutputFormat::Flatbuffers),
            "binary" => Ok(OutputFormat::Binary),
            _ => Err(Error::invalid(format!("unknown output format '{}'", s))),
        }
    }
}

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Longitude in [-180, 180]
    pub lon: f64,
    /// Latitude in [-90, 90]
    pub lat: f64,
}

impl Coordinate {
    /// Validated coordinate
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        if !(lon_ok && lat_ok) {
            return Err(Error::CoordinateOutOfRange { lon, lat });
        }
        Ok(Coordinate { lon, lat })
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.lon, self.lat].serialize(serializer)
    }
}

/// Bearing restriction for snapping: `value` ± `range` degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bearing {
    /// Bearing in [0, 360]
    pub value: u16,
    /// Allowed deviation in [0, 180]
    pub range: u16,
}

impl Bearing {
    /// Validated bearing
    pub fn new(value: i32, range: i32) -> Result<Self> {
        if !(0..=360).contains(&value) || !(0..=180).contains(&range) {
            return Err(Error::invalid(format!(
                "bearing {} +/- {} outside [0, 360] +/- [0, 180]",
                value, range
            )));
        }
        Ok(Bearing {
            value: value as u16,
            range: range as u16,
        })
    }

    /// Bearing from the C convention where negative values mean "unset"
    pub fn optional(value: i32, range: i32) -> Result<Option<Self>> {
        if value < 0 || range < 0 {
            return Ok(None);
        }
        Bearing::new(value, range).map(Some)
    }
}

impl Serialize for Bearing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.value, self.range].serialize(serializer)
    }
}

/// Side of the road a waypoint may be approached from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    /// Arrive on the curb side
    Curb,
    /// Either side
    Unrestricted,
    /// Arrive on the opposite side
    Opposite,
}

/// Which edges a coordinate may snap to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Snapping {
    /// Only edges routable from the rest of the network
    #[default]
    Default,
    /// Any edge
    Any,
}

/// One input coordinate with its snapping options
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Position
    pub coordinate: Coordinate,
    /// Snapping radius in meters
    pub radius: Option<f64>,
    /// Bearing restriction
    pub bearing: Option<Bearing>,
    /// Base64 hint from a previous response
    pub hint: Option<String>,
    /// Approach side
    pub approach: Option<Approach>,
}

impl Waypoint {
    fn at(coordinate: Coordinate) -> Self {
        Waypoint {
            coordinate,
            radius: None,
            bearing: None,
            hint: None,
            approach: None,
        }
    }
}

/// Fields shared by every service
#[derive(Debug, Clone, PartialEq)]
pub struct BaseParams {
    waypoints: Vec<Waypoint>,
    format: OutputFormat,
    exclude: Vec<String>,
    generate_hints: bool,
    skip_waypoints: bool,
    snapping: Snapping,
}

impl BaseParams {
    fn new(format: OutputFormat) -> Self {
        BaseParams {
            waypoints: Vec::new(),
            format,
            exclude: Vec::new(),
            generate_hints: true,
            skip_waypoints: false,
            snapping: Snapping::Default,
        }
    }

    /// Coordinates with their snapping options, in insertion order
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Selected output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Excluded road classes
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Whether responses carry hints
    pub fn generate_hints(&self) -> bool {
        self.generate_hints
    }

    /// Whether responses omit waypoints
    pub fn skip_waypoints(&self) -> bool {
        self.skip_waypoints
    }

    /// Snapping mode
    pub fn snapping(&self) -> Snapping {
        self.snapping
    }
}

// Serialized as parallel per-coordinate arrays; option arrays are only
// emitted once at least one coordinate sets them.
impl Serialize for BaseParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let coordinates: Vec<Coordinate> = self.waypoints.iter().map(|w| w.coordinate).collect();
        let radiuses: Vec<Option<f64>> = self.waypoints.iter().map(|w| w.radius).collect();
        let bearings: Vec<Option<Bearing>> = self.waypoints.iter().map(|w| w.bearing).collect();
        let hints: Vec<Option<&str>> = self.waypoints.iter().map(|w| w.hint.as_deref()).collect();
        let approaches: Vec<Option<Approach>> =
            self.waypoints.iter().map(|w| w.approach).collect();

        let mut state = serializer.serialize_struct("BaseParams", 10)?;
        state.serialize_field("format", &self.format)?;
        state.serialize_field("coordinates", &coordinates)?;
        if radiuses.iter().any(Option::is_some) {
            state.serialize_field("radiuses", &radiuses)?;
        } else {
            state.skip_field("radiuses")?;
        }
        if bearings.iter().any(Option::is_some) {
            state.serialize_field("bearings", &bearings)?;
        } else {
            state.skip_field("bearings")?;
        }
        if hints.iter().any(Option::is_some) {
            state.serialize_field("hints", &hints)?;
        } else {
            state.skip_field("hints")?;
        }
        if approaches.iter().any(Option::is_some) {
            state.serialize_field("approaches", &approaches)?;
        } else {
            state.skip_field("approaches")?;
        }
        state.serialize_field("exclude", &self.exclude)?;
        state.serialize_field("generate_hints", &self.generate_hints)?;
        state.serialize_field("skip_waypoints", &self.skip_waypoints)?;
        state.serialize_field("snapping", &self.snapping)?;
        state.end()
    }
}

/// Nearest-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearestParams {
    number_of_results: u32,
}

impl NearestParams {
    /// Number of candidates to return
    pub fn number_of_results(&self) -> u32 {
        self.number_of_results
    }

    /// Set the number of candidates (at least one)
    pub fn set_number_of_results(&mut self, n: u32) -> Result<()> {
        if n == 0 {
            return Err(Error::invalid("number_of_results must be at least 1"));
        }
        self.number_of_results = n;
        Ok(())
    }
}

impl Default for NearestParams {
    fn default() -> Self {
        NearestParams { number_of_results: 1 }
    }
}

/// Service-specific part of a parameter object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "service", rename_all = "lowercase")]
pub enum ServiceParams {
    /// Nearest fields
    Nearest(NearestParams),
    /// Route fields
    Route(RouteOptions),
    /// Table fields
    Table(TableParams),
    /// Match fields
    Match(MatchParams),
    /// Trip fields
    Trip(TripParams),
    /// Tile fields
    Tile(TileParams),
}

impl ServiceParams {
    fn new(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::Nearest => ServiceParams::Nearest(NearestParams::default()),
            ServiceKind::Route => ServiceParams::Route(RouteOptions::default()),
            ServiceKind::Table => ServiceParams::Table(TableParams::default()),
            ServiceKind::Match => ServiceParams::Match(MatchParams::default()),
            ServiceKind::Trip => ServiceParams::Trip(TripParams::default()),
            ServiceKind::Tile => ServiceParams::Tile(TileParams::default()),
        }
    }

    /// Discriminant of this variant
    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceParams::Nearest(_) => ServiceKind::Nearest,
            ServiceParams::Route(_) => ServiceKind::Route,
            ServiceParams::Table(_) => ServiceKind::Table,
            ServiceParams::Match(_) => ServiceKind::Match,
            ServiceParams::Trip(_) => ServiceKind::Trip,
            ServiceParams::Tile(_) => ServiceKind::Tile,
        }
    }
}

/// A mutable, service-tagged description of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    #[serde(flatten)]
    base: BaseParams,
    #[serde(flatten)]
    service: ServiceParams,
}

impl Params {
    /// Empty parameters for a service
    ///
    /// Tile parameters default to [`OutputFormat::Binary`], every other
    /// service to [`OutputFormat::Json`].
    pub fn new(kind: ServiceKind) -> Self {
        let format = if kind == ServiceKind::Tile {
            OutputFormat::Binary
        } else {
            OutputFormat::Json
        };
        Params {
            base: BaseParams::new(format),
            service: ServiceParams::new(kind),
        }
    }

    /// Service this object was built for
    pub fn kind(&self) -> ServiceKind {
        self.service.kind()
    }

    /// Common fields
    pub fn base(&self) -> &BaseParams {
        &self.base
    }

    /// Service-specific fields
    pub fn service(&self) -> &ServiceParams {
        &self.service
    }

    /// Number of coordinates added so far
    pub fn coordinate_count(&self) -> usize {
        self.base.waypoints.len()
    }

    /// Selected output format
    pub fn format(&self) -> OutputFormat {
        self.base.format
    }

    /// Append a coordinate
    ///
    /// Out-of-range values leave the coordinate sequence unchanged.
    pub fn add_coordinate(&mut self, lon: f64, lat: f64) -> Result<()> {
        let coordinate = Coordinate::new(lon, lat)?;
        self.base.waypoints.push(Waypoint::at(coordinate));
        Ok(())
    }

    /// Append a coordinate with radius and bearing
    ///
    /// A negative `radius` leaves the radius unset, as does a negative
    /// `bearing` or `range` for the bearing. Nothing is appended on error.
    pub fn add_coordinate_with(
        &mut self,
        lon: f64,
        lat: f64,
        radius: f64,
        bearing: i32,
        range: i32,
    ) -> Result<()> {
        let coordinate = Coordinate::new(lon, lat)?;
        let bearing = Bearing::optional(bearing, range)?;
        let mut waypoint = Waypoint::at(coordinate);
        waypoint.radius = optional_radius(radius)?;
        waypoint.bearing = bearing;
        self.base.waypoints.push(waypoint);
        Ok(())
    }

    fn waypoint_mut(&mut self, what: &'static str, index: usize) -> Result<&mut Waypoint> {
        let count = self.base.waypoints.len();
        self.base
            .waypoints
            .get_mut(index)
            .ok_or(Error::InvalidCoordinateIndex { what, index, count })
    }

    /// Set or clear the hint of an existing coordinate
    pub fn set_hint(&mut self, index: usize, hint: Option<&str>) -> Result<()> {
        if let Some(h) = hint {
            validate_hint(h)?;
        }
        self.waypoint_mut("hint", index)?.hint = hint.map(str::to_string);
        Ok(())
    }

    /// Set the snapping radius of an existing coordinate (negative clears)
    pub fn set_radius(&mut self, index: usize, radius: f64) -> Result<()> {
        let radius = optional_radius(radius)?;
        self.waypoint_mut("radius", index)?.radius = radius;
        Ok(())
    }

    /// Set the bearing of an existing coordinate (negative clears)
    pub fn set_bearing(&mut self, index: usize, value: i32, range: i32) -> Result<()> {
        let bearing = Bearing::optional(value, range)?;
        self.waypoint_mut("bearing", index)?.bearing = bearing;
        Ok(())
    }

    /// Set or clear the approach of an existing coordinate
    pub fn set_approach(&mut self, index: usize, approach: Option<Approach>) -> Result<()> {
        self.waypoint_mut("approach", index)?.approach = approach;
        Ok(())
    }

    /// Exclude a road class (e.g. `motorway`, `toll`)
    pub fn add_exclude(&mut self, class: &str) -> Result<()> {
        if class.is_empty() {
            return Err(Error::invalid("exclude class must not be empty"));
        }
        self.base.exclude.push(class.to_string());
        Ok(())
    }

    /// Whether responses carry hints
    pub fn set_generate_hints(&mut self, on: bool) {
        self.base.generate_hints = on;
    }

    /// Whether responses omit waypoints
    pub fn set_skip_waypoints(&mut self, on: bool) {
        self.base.skip_waypoints = on;
    }

    /// Snapping mode
    pub fn set_snapping(&mut self, snapping: Snapping) {
        self.base.snapping = snapping;
    }

    /// Select the output format
    pub fn set_format(&mut self, format: OutputFormat) -> Result<()> {
        let kind = self.kind();
        if !format.is_supported_by(kind) {
            return Err(Error::FormatUnsupported(format!(
                "{} service does not support {:?} output",
                kind, format
            )));
        }
        self.base.format = format;
        Ok(())
    }

    fn wrong_service(&self, expected: ServiceKind) -> Error {
        Error::WrongServiceType {
            expected: expected.name(),
            actual: self.kind().name(),
        }
    }

    /// Route option block of a Route, Match or Trip object
    ///
    /// `expected` names the service the caller is configuring; it must equal
    /// this object's kind.
    pub fn route_like_mut(&mut self, expected: ServiceKind) -> Result<&mut RouteOptions> {
        let err = self.wrong_service(expected);
        match (&mut self.service, expected) {
            (ServiceParams::Route(route), ServiceKind::Route) => Ok(route),
            (ServiceParams::Match(m), ServiceKind::Match) => Ok(&mut m.route),
            (ServiceParams::Trip(t), ServiceKind::Trip) => Ok(&mut t.route),
            _ => Err(err),
        }
    }

    /// Nearest fields
    pub fn nearest_mut(&mut self) -> Result<&mut NearestParams> {
        let err = self.wrong_service(ServiceKind::Nearest);
        match &mut self.service {
            ServiceParams::Nearest(p) => Ok(p),
            _ => Err(err),
        }
    }

    /// Table fields
    pub fn table_mut(&mut self) -> Result<&mut TableParams> {
        let err = self.wrong_service(ServiceKind::Table);
        match &mut self.service {
            ServiceParams::Table(p) => Ok(p),
            _ => Err(err),
        }
    }

    /// Match fields
    pub fn match_mut(&mut self) -> Result<&mut MatchParams> {
        let err = self.wrong_service(ServiceKind::Match);
        match &mut self.service {
            ServiceParams::Match(p) => Ok(p),
            _ => Err(err),
        }
    }

    /// Trip fields
    pub fn trip_mut(&mut self) -> Result<&mut TripParams> {
        let err = self.wrong_service(ServiceKind::Trip);
        match &mut self.service {
            ServiceParams::Trip(p) => Ok(p),
            _ => Err(err),
        }
    }

    /// Tile fields
    pub fn tile_mut(&mut self) -> Result<&mut TileParams> {
        let err = self.wrong_service(ServiceKind::Tile);
        match &mut self.service {
            ServiceParams::Tile(p) => Ok(p),
            _ => Err(err),
        }
    }

    /// Invocation-time checks for `kind`
    ///
    /// Verifies the tag, the output format, the minimum coordinate count and
    /// that every index-valued option addresses an existing coordinate.
    pub fn validate_for(&self, kind: ServiceKind) -> Result<()> {
        if self.kind() != kind {
            return Err(self.wrong_service(kind));
        }
        if !self.base.format.is_supported_by(kind) {
            return Err(Error::FormatUnsupported(format!(
                "{} service does not support {:?} output",
                kind, self.base.format
            )));
        }
        let count = self.coordinate_count();
        let required = kind.min_coordinates();
        if count < required {
            return Err(Error::TooFewCoordinates {
                service: kind.name(),
                required,
                actual: count,
            });
        }
        match &self.service {
            ServiceParams::Nearest(_) => Ok(()),
            ServiceParams::Route(route) => route.validate_indices(count),
            ServiceParams::Match(m) => m.route.validate_indices(count),
            ServiceParams::Trip(t) => t.route.validate_indices(count),
            ServiceParams::Table(table) => table.validate_indices(count),
            ServiceParams::Tile(tile) => tile.validate(),
        }
    }

    /// Serialize as the JSON request document native engines receive
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::Internal(format!("cannot serialize {} parameters: {}", self.kind(), e)))
    }
}

fn optional_radius(radius: f64) -> Result<Option<f64>> {
    if radius.is_nan() || radius.is_infinite() {
        return Err(Error::invalid(format!("radius {} is not finite", radius)));
    }
    Ok((radius >= 0.0).then_some(radius))
}

fn validate_hint(hint: &str) -> Result<()> {
    let valid = !hint.is_empty()
        && hint
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'-' | b'_'));
    if !valid {
        return Err(Error::invalid("hint is not valid base64"));
    }
    Ok(())
}

/// Checks that every index in `indices` addresses one of `count` coordinates
pub(crate) fn check_indices(what: &'static str, indices: &[usize], count: usize) -> Result<()> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(Error::InvalidCoordinateIndex { what, index, count }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_per_service() {
        for kind in ServiceKind::ALL {
            let params = Params::new(kind);
            assert_eq!(params.kind(), kind);
            assert_eq!(params.coordinate_count(), 0);
            let expected = if kind == ServiceKind::Tile {
                OutputFormat::Binary
            } else {
                OutputFormat::Json
            };
            assert_eq!(params.format(), expected);
        }
    }

    #[test]
    fn test_names_parse() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.name().parse::<ServiceKind>().unwrap(), kind);
        }
        assert_eq!("Route".parse::<ServiceKind>().unwrap(), ServiceKind::Route);
        assert!("viaroute".parse::<ServiceKind>().is_err());
        assert_eq!("BINARY".parse::<OutputFormat>().unwrap(), OutputFormat::Binary);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_coordinate_bounds_inclusive() {
        let mut params = Params::new(ServiceKind::Route);
        params.add_coordinate(180.0, 90.0).unwrap();
        params.add_coordinate(-180.0, -90.0).unwrap();
        assert_eq!(params.coordinate_count(), 2);
    }

    #[test]
    fn test_coordinate_non_finite_rejected() {
        let mut params = Params::new(ServiceKind::Route);
        assert!(params.add_coordinate(f64::NAN, 0.0).is_err());
        assert!(params.add_coordinate(0.0, f64::INFINITY).is_err());
        assert_eq!(params.coordinate_count(), 0);
    }

    #[test]
    fn test_add_coordinate_with_options() {
        let mut params = Params::new(ServiceKind::Route);
        params.add_coordinate_with(13.38, 52.51, 25.0, 90, 20).unwrap();
        params.add_coordinate_with(13.39, 52.52, -1.0, -1, 10).unwrap();
        let wps = params.base().waypoints();
        assert_eq!(wps[0].radius, Some(25.0));
        assert_eq!(wps[0].bearing, Some(Bearing { value: 90, range: 20 }));
        assert_eq!(wps[1].radius, None);
        assert_eq!(wps[1].bearing, None);

        let err = params.add_coordinate_with(13.4, 52.5, 5.0, 400, 10).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert_eq!(params.coordinate_count(), 2);
    }

    #[test]
    fn test_per_coordinate_index_checked() {
        let mut params = Params::new(ServiceKind::Table);
        params.add_coordinate(13.38, 52.51).unwrap();

        assert!(params.set_radius(0, 10.0).is_ok());
        assert!(params.set_approach(0, Some(Approach::Curb)).is_ok());
        assert!(params.set_hint(0, Some("AbC-_09==")).is_ok());

        let err = params.set_bearing(1, 10, 10).unwrap_err();
        assert_eq!(err.code(), "INVALID_COORDINATE_INDEX");
        assert_eq!(
            err.to_string(),
            "bearing index 1 out of bounds for 1 coordinate(s)"
        );
        assert!(params.set_hint(0, Some("not base64!")).is_err());
        assert!(params.set_hint(0, None).is_ok());
        assert_eq!(params.base().waypoints()[0].hint, None);
    }

    #[test]
    fn test_binary_format_tile_only() {
        let mut route = Params::new(ServiceKind::Route);
        let err = route.set_format(OutputFormat::Binary).unwrap_err();
        assert_eq!(err.code(), "FORMAT_UNSUPPORTED");
        assert_eq!(route.format(), OutputFormat::Json);
        assert!(route.set_format(OutputFormat::Flatbuffers).is_ok());

        let mut tile = Params::new(ServiceKind::Tile);
        assert!(tile.set_format(OutputFormat::Json).is_ok());
        assert!(tile.set_format(OutputFormat::Binary).is_ok());
    }

    #[test]
    fn test_service_accessors_check_tag() {
        let mut table = Params::new(ServiceKind::Table);
        let err = table.route_like_mut(ServiceKind::Route).unwrap_err();
        assert_eq!(err.code(), "WRONG_SERVICE_TYPE");
        assert!(table.tile_mut().is_err());
        assert!(table.nearest_mut().is_err());
        assert!(table.table_mut().is_ok());

        // Match carries route options but only under its own service name
        let mut matching = Params::new(ServiceKind::Match);
        assert!(matching.route_like_mut(ServiceKind::Match).is_ok());
        assert!(matching.route_like_mut(ServiceKind::Route).is_err());
        assert!(matching.trip_mut().is_err());
    }

    #[test]
    fn test_validate_minimum_counts() {
        for kind in ServiceKind::ALL {
            let mut params = Params::new(kind);
            for i in 0..kind.min_coordinates() {
                if let Err(err) = params.validate_for(kind) {
                    assert_eq!(err.code(), "TOO_FEW_COORDINATES");
                }
                params.add_coordinate(13.0 + i as f64 * 0.01, 52.0).unwrap();
            }
            assert!(params.validate_for(kind).is_ok(), "{} should validate", kind);
        }
    }

    #[test]
    fn test_validate_wrong_kind() {
        let mut params = Params::new(ServiceKind::Route);
        params.add_coordinate(13.38, 52.51).unwrap();
        params.add_coordinate(13.39, 52.52).unwrap();
        let err = params.validate_for(ServiceKind::Tile).unwrap_err();
        assert_eq!(err.code(), "WRONG_SERVICE_TYPE");
    }

    #[test]
    fn test_request_document() {
        let mut params = Params::new(ServiceKind::Nearest);
        params.add_coordinate(13.388860, 52.517037).unwrap();
        params.set_radius(0, 50.0).unwrap();
        params.nearest_mut().unwrap().set_number_of_results(3).unwrap();
        assert!(params.nearest_mut().unwrap().set_number_of_results(0).is_err());
        params.add_exclude("ferry").unwrap();

        let doc: serde_json::Value = serde_json::from_str(&params.to_json().unwrap()).unwrap();
        assert_eq!(doc["service"], "nearest");
        assert_eq!(doc["format"], "json");
        assert_eq!(doc["coordinates"][0][0], 13.388860);
        assert_eq!(doc["coordinates"][0][1], 52.517037);
        assert_eq!(doc["radiuses"][0], 50.0);
        assert!(doc.get("bearings").is_none());
        assert_eq!(doc["number_of_results"], 3);
        assert_eq!(doc["exclude"][0], "ferry");
        assert_eq!(doc["generate_hints"], true);
        assert_eq!(doc["snapping"], "default");
    }

    #[test]
    fn test_request_document_per_service() {
        fn document(kind: ServiceKind, edit: &dyn Fn(&mut Params)) -> serde_json::Value {
            let mut params = Params::new(kind);
            params.add_coordinate(13.388860, 52.517037).unwrap();
            params.add_coordinate(13.397634, 52.529407).unwrap();
            edit(&mut params);
            serde_json::from_str(&params.to_json().unwrap()).unwrap()
        }

        let doc = document(ServiceKind::Nearest, &|_| {});
        assert_eq!(doc["service"], "nearest");
        assert_eq!(doc["number_of_results"], 1);

        let doc = document(ServiceKind::Route, &|p| {
            p.route_like_mut(ServiceKind::Route).unwrap().set_steps(true);
        });
        assert_eq!(doc["service"], "route");
        assert_eq!(doc["steps"], true);
        assert_eq!(doc["geometries"], "polyline");

        let doc = document(ServiceKind::Table, &|p| {
            p.table_mut().unwrap().add_source(1);
        });
        assert_eq!(doc["service"], "table");
        assert_eq!(doc["sources"][0], 1);
        assert_eq!(doc["annotations"][0], "duration");

        let doc = document(ServiceKind::Match, &|p| {
            p.route_like_mut(ServiceKind::Match).unwrap().set_overview(Overview::Full);
            let m = p.match_mut().unwrap();
            m.add_timestamp(1_424_684_612);
            m.set_tidy(true);
        });
        assert_eq!(doc["service"], "match");
        assert_eq!(doc["overview"], "full");
        assert_eq!(doc["timestamps"][0], 1_424_684_612u64);
        assert_eq!(doc["gaps"], "split");
        assert_eq!(doc["tidy"], true);

        let doc = document(ServiceKind::Trip, &|_| {});
        assert_eq!(doc["service"], "trip");
        assert_eq!(doc["roundtrip"], true);
        assert_eq!(doc["source"], "any");
        assert_eq!(doc["steps"], false);

        let doc = document(ServiceKind::Tile, &|p| {
            let tile = p.tile_mut().unwrap();
            tile.x = 8800;
            tile.z = 14;
        });
        assert_eq!(doc["service"], "tile");
        assert_eq!(doc["format"], "binary");
        assert_eq!(doc["x"], 8800);
        assert_eq!(doc["z"], 14);
    }

    proptest! {
        #[test]
        fn prop_out_of_range_never_appends(
            lon in prop_oneof![-1.0e6f64..-180.000001, 180.000001f64..1.0e6],
            lat in -90.0f64..=90.0,
        ) {
            let mut params = Params::new(ServiceKind::Route);
            params.add_coordinate(0.0, 0.0).unwrap();
            let err = params.add_coordinate(lon, lat).unwrap_err();
            prop_assert_eq!(err.code(), "COORDINATE_OUT_OF_RANGE");
            let err = params.add_coordinate(lat, lon).unwrap_err();
            prop_assert_eq!(err.code(), "COORDINATE_OUT_OF_RANGE");
            prop_assert_eq!(params.coordinate_count(), 1);
        }

        #[test]
        fn prop_in_range_always_appends(lon in -180.0f64..=180.0, lat in -90.0f64..=90.0) {
            let mut params = Params::new(ServiceKind::Table);
            prop_assert!(params.add_coordinate(lon, lat).is_ok());
            prop_assert_eq!(params.base().waypoints()[0].coordinate, Coordinate { lon, lat });
        }
    }
}
