//! Table service fields

use super::check_indices;
use super::route::parse_tokens;
use crate::error::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Which matrices the table service computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableAnnotations(u8);

impl TableAnnotations {
    /// No matrix
    pub const NONE: Self = TableAnnotations(0);
    /// Duration matrix
    pub const DURATION: Self = TableAnnotations(1);
    /// Distance matrix
    pub const DISTANCE: Self = TableAnnotations(1 << 1);
    /// Both matrices
    pub const ALL: Self = TableAnnotations(0x3);

    /// Raw bits
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse tokens like `"duration|distance"`
    pub fn parse(tokens: &str) -> Result<Self> {
        parse_tokens(
            tokens,
            |t| match t {
                "duration" => Some(Self::DURATION.0),
                "distance" => Some(Self::DISTANCE.0),
                _ => None,
            },
            Self::ALL.0,
        )
        .map(TableAnnotations)
    }
}

impl Default for TableAnnotations {
    fn default() -> Self {
        TableAnnotations::DURATION
    }
}

impl Serialize for TableAnnotations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        if self.contains(Self::DURATION) {
            seq.serialize_element("duration")?;
        }
        if self.contains(Self::DISTANCE) {
            seq.serialize_element("distance")?;
        }
        seq.end()
    }
}

/// Coordinate used when estimating unreachable cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackCoordinate {
    /// The input coordinate
    #[default]
    Input,
    /// The coordinate snapped to the network
    Snapped,
}

impl FromStr for FallbackCoordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(FallbackCoordinate::Input),
            "snapped" => Ok(FallbackCoordinate::Snapped),
            _ => Err(Error::invalid(format!("unknown fallback coordinate type '{}'", s))),
        }
    }
}

/// Table-specific fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sources: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    destinations: Vec<usize>,
    annotations: TableAnnotations,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_speed: Option<f64>,
    fallback_coordinate: FallbackCoordinate,
    scale_factor: f64,
}

impl Default for TableParams {
    fn default() -> Self {
        TableParams {
            sources: Vec::new(),
            destinations: Vec::new(),
            annotations: TableAnnotations::default(),
            fallback_speed: None,
            fallback_coordinate: FallbackCoordinate::Input,
            scale_factor: 1.0,
        }
    }
}

impl TableParams {
    /// Use the coordinate at `index` as a row
    pub fn add_source(&mut self, index: usize) {
        self.sources.push(index);
    }

    /// Use the coordinate at `index` as a column
    pub fn add_destination(&mut self, index: usize) {
        self.destinations.push(index);
    }

    /// Matrices to compute, `None` resets to durations only
    pub fn set_annotations(&mut self, annotations: Option<TableAnnotations>) {
        self.annotations = annotations.unwrap_or_default();
    }

    /// Crow-fly speed in m/s for cells the engine cannot route
    pub fn set_fallback_speed(&mut self, speed: f64) -> Result<()> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(Error::invalid(format!(
                "fallback_speed must be positive, got {}",
                speed
            )));
        }
        self.fallback_speed = Some(speed);
        Ok(())
    }

    /// Coordinate used for fallback estimates
    pub fn set_fallback_coordinate(&mut self, coordinate: FallbackCoordinate) {
        self.fallback_coordinate = coordinate;
    }

    /// Multiplier applied to durations
    pub fn set_scale_factor(&mut self, factor: f64) -> Result<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(Error::invalid(format!(
                "scale_factor must be positive, got {}",
                factor
            )));
        }
        self.scale_factor = factor;
        Ok(())
    }

    /// Row indices, empty means every coordinate
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Column indices, empty means every coordinate
    pub fn destinations(&self) -> &[usize] {
        &self.destinations
    }

    /// Requested matrices
    pub fn annotations(&self) -> TableAnnotations {
        self.annotations
    }

    /// Fallback speed, if set
    pub fn fallback_speed(&self) -> Option<f64> {
        self.fallback_speed
    }

    /// Duration multiplier
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub(super) fn validate_indices(&self, count: usize) -> Result<()> {
        check_indices("source", &self.sources, count)?;
        check_indices("destination", &self.destinations, count)
    }
}
