//! Route option block shared by Route, Match and Trip

use super::check_indices;
use crate::error::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Geometry encoding of returned routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometries {
    /// Polyline with precision 5
    #[default]
    Polyline,
    /// Polyline with precision 6
    Polyline6,
    /// GeoJSON LineString
    GeoJson,
}

impl FromStr for Geometries {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "polyline" => Ok(Geometries::Polyline),
            "polyline6" => Ok(Geometries::Polyline6),
            "geojson" => Ok(Geometries::GeoJson),
            _ => Err(Error::invalid(format!("unknown geometries '{}'", s))),
        }
    }
}

/// Amount of overview geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overview {
    /// Simplified to the zoom level the route fits
    #[default]
    Simplified,
    /// Full resolution
    Full,
    /// No overview geometry
    False,
}

impl FromStr for Overview {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simplified" => Ok(Overview::Simplified),
            "full" => Ok(Overview::Full),
            "false" | "none" => Ok(Overview::False),
            _ => Err(Error::invalid(format!("unknown overview '{}'", s))),
        }
    }
}

/// Per-segment annotation bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteAnnotations(u8);

impl RouteAnnotations {
    /// No annotations
    pub const NONE: Self = RouteAnnotations(0);
    /// Segment durations
    pub const DURATION: Self = RouteAnnotations(1);
    /// OSM node ids
    pub const NODES: Self = RouteAnnotations(1 << 1);
    /// Segment distances
    pub const DISTANCE: Self = RouteAnnotations(1 << 2);
    /// Segment weights
    pub const WEIGHT: Self = RouteAnnotations(1 << 3);
    /// Speed data source ids
    pub const DATASOURCES: Self = RouteAnnotations(1 << 4);
    /// Segment speeds
    pub const SPEED: Self = RouteAnnotations(1 << 5);
    /// Every annotation
    pub const ALL: Self = RouteAnnotations(0x3f);

    const NAMES: [(&'static str, RouteAnnotations); 6] = [
        ("duration", Self::DURATION),
        ("nodes", Self::NODES),
        ("distance", Self::DISTANCE),
        ("weight", Self::WEIGHT),
        ("datasources", Self::DATASOURCES),
        ("speed", Self::SPEED),
    ];

    /// Raw bits
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bit is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse tokens like `"duration,distance"` or `"speed|nodes"`
    pub fn parse(tokens: &str) -> Result<Self> {
        parse_tokens(tokens, |t| {
            Self::NAMES
                .iter()
                .find(|(name, _)| *name == t)
                .map(|(_, mask)| mask.0)
        }, Self::ALL.0)
        .map(RouteAnnotations)
    }
}

impl std::ops::BitOr for RouteAnnotations {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        RouteAnnotations(self.0 | rhs.0)
    }
}

impl Serialize for RouteAnnotations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(_, mask)| self.contains(*mask))
            .map(|(name, _)| *name)
            .collect();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Token grammar shared by route and table annotations
///
/// Tokens are separated by `,` or `|` and compared case-insensitively. `all`
/// short-circuits to `all_bits`; `none` only counts when it stands alone.
pub(crate) fn parse_tokens(
    input: &str,
    lookup: impl Fn(&str) -> Option<u8>,
    all_bits: u8,
) -> Result<u8> {
    let tokens: Vec<String> = input
        .split([',', '|'])
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut mask = 0u8;
    for token in &tokens {
        match token.as_str() {
            "all" => return Ok(all_bits),
            "none" => continue,
            other => {
                mask |= lookup(other)
                    .ok_or_else(|| Error::invalid(format!("unknown annotation '{}'", other)))?;
            }
        }
    }
    Ok(mask)
}

/// Options of the route service, embedded by match and trip
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteOptions {
    steps: bool,
    alternatives: bool,
    number_of_alternatives: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<RouteAnnotations>,
    geometries: Geometries,
    overview: Overview,
    #[serde(skip_serializing_if = "Option::is_none")]
    continue_straight: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    waypoints: Vec<usize>,
}

impl RouteOptions {
    /// Return turn-by-turn steps
    pub fn set_steps(&mut self, on: bool) {
        self.steps = on;
    }

    /// Search for alternative routes
    pub fn set_alternatives(&mut self, on: bool) {
        self.alternatives = on;
        if !on {
            self.number_of_alternatives = 0;
        }
    }

    /// Number of alternatives to search for; enables alternatives when > 0
    pub fn set_number_of_alternatives(&mut self, n: u32) {
        self.number_of_alternatives = n;
        self.alternatives = n > 0;
    }

    /// Geometry encoding
    pub fn set_geometries(&mut self, geometries: Geometries) {
        self.geometries = geometries;
    }

    /// Overview level
    pub fn set_overview(&mut self, overview: Overview) {
        self.overview = overview;
    }

    /// Force straight continuation at waypoints, `None` for the engine default
    pub fn set_continue_straight(&mut self, on: Option<bool>) {
        self.continue_straight = on;
    }

    /// Annotation mask, `None` disables annotations
    pub fn set_annotations(&mut self, annotations: Option<RouteAnnotations>) {
        self.annotations = annotations.filter(|a| !a.is_empty());
    }

    /// Mark a coordinate as a leg-separating waypoint
    pub fn add_waypoint(&mut self, index: usize) {
        self.waypoints.push(index);
    }

    /// Treat every coordinate as a waypoint again
    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear();
    }

    /// Whether steps are requested
    pub fn steps(&self) -> bool {
        self.steps
    }

    /// Whether alternatives are requested
    pub fn alternatives(&self) -> bool {
        self.alternatives
    }

    /// Requested number of alternatives
    pub fn number_of_alternatives(&self) -> u32 {
        self.number_of_alternatives
    }

    /// Requested annotations
    pub fn annotations(&self) -> Option<RouteAnnotations> {
        self.annotations
    }

    /// Geometry encoding
    pub fn geometries(&self) -> Geometries {
        self.geometries
    }

    /// Overview level
    pub fn overview(&self) -> Overview {
        self.overview
    }

    /// Continue-straight override
    pub fn continue_straight(&self) -> Option<bool> {
        self.continue_straight
    }

    /// Explicit waypoint indices
    pub fn waypoints(&self) -> &[usize] {
        &self.waypoints
    }

    pub(super) fn validate_indices(&self, count: usize) -> Result<()> {
        check_indices("waypoint", &self.waypoints, count)
    }
}

/// How the matcher treats gaps in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gaps {
    /// Split the trace at gaps
    #[default]
    Split,
    /// Match across gaps
    Ignore,
}

impl FromStr for Gaps {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "split" => Ok(Gaps::Split),
            "ignore" => Ok(Gaps::Ignore),
            _ => Err(Error::invalid(format!("unknown gaps mode '{}'", s))),
        }
    }
}

/// Match-specific fields
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchParams {
    #[serde(flatten)]
    pub(super) route: RouteOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    timestamps: Vec<u64>,
    gaps: Gaps,
    tidy: bool,
}

impl MatchParams {
    /// Embedded route options
    pub fn route(&self) -> &RouteOptions {
        &self.route
    }

    /// Append a UNIX timestamp for the next trace point
    pub fn add_timestamp(&mut self, timestamp: u64) {
        self.timestamps.push(timestamp);
    }

    /// Gap handling
    pub fn set_gaps(&mut self, gaps: Gaps) {
        self.gaps = gaps;
    }

    /// Remove redundant trace points before matching
    pub fn set_tidy(&mut self, on: bool) {
        self.tidy = on;
    }

    /// Timestamps added so far
    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    /// Gap handling
    pub fn gaps(&self) -> Gaps {
        self.gaps
    }

    /// Whether the trace is tidied
    pub fn tidy(&self) -> bool {
        self.tidy
    }
}

/// Where a trip starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripSource {
    /// Any coordinate
    #[default]
    Any,
    /// The first coordinate
    First,
}

impl FromStr for TripSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(TripSource::Any),
            "first" => Ok(TripSource::First),
            _ => Err(Error::invalid(format!("unknown trip source '{}'", s))),
        }
    }
}

/// Where a trip ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripDestination {
    /// Any coordinate
    #[default]
    Any,
    /// The last coordinate
    Last,
}

impl FromStr for TripDestination {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(TripDestination::Any),
            "last" => Ok(TripDestination::Last),
            _ => Err(Error::invalid(format!("unknown trip destination '{}'", s))),
        }
    }
}

/// Trip-specific fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripParams {
    #[serde(flatten)]
    pub(super) route: RouteOptions,
    roundtrip: bool,
    source: TripSource,
    destination: TripDestination,
}

impl Default for TripParams {
    fn default() -> Self {
        TripParams {
            route: RouteOptions::default(),
            roundtrip: true,
            source: TripSource::Any,
            destination: TripDestination::Any,
        }
    }
}

impl TripParams {
    /// Embedded route options
    pub fn route(&self) -> &RouteOptions {
        &self.route
    }

    /// Return to the start
    pub fn set_roundtrip(&mut self, on: bool) {
        self.roundtrip = on;
    }

    /// Start constraint
    pub fn set_source(&mut self, source: TripSource) {
        self.source = source;
    }

    /// End constraint
    pub fn set_destination(&mut self, destination: TripDestination) {
        self.destination = destination;
    }

    /// Whether the trip is a round trip
    pub fn roundtrip(&self) -> bool {
        self.roundtrip
    }

    /// Start constraint
    pub fn source(&self) -> TripSource {
        self.source
    }

    /// End constraint
    pub fn destination(&self) -> TripDestination {
        self.destination
    }
}
