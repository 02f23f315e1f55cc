/// Error types for the osrmc library
use thiserror::Error;

/// Result type alias for osrmc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for osrmc operations
///
/// Every variant maps to a short, stable code (see [`Error::code`]) that
/// crosses the C boundary unchanged. Engine failures keep the code the
/// engine reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Dataset path missing, unreadable, or produced by an incompatible version
    #[error("{0}")]
    ConfigInvalid(String),

    /// The engine could not load the dataset
    #[error("{0}")]
    EngineLoadFailed(String),

    /// Longitude or latitude outside WGS84 bounds
    #[error("coordinate ({lon}, {lat}) is outside [-180, 180] x [-90, 90]")]
    CoordinateOutOfRange {
        /// Rejected longitude
        lon: f64,
        /// Rejected latitude
        lat: f64,
    },

    /// Output format not available for the service
    #[error("{0}")]
    FormatUnsupported(String),

    /// A parameter object or response was used with the wrong service
    #[error("expected {expected} parameters, got {actual}")]
    WrongServiceType {
        /// Service the operation belongs to
        expected: &'static str,
        /// Service the object was built for
        actual: &'static str,
    },

    /// Not enough coordinates for the service
    #[error("{service} requires at least {required} coordinate(s), got {actual}")]
    TooFewCoordinates {
        /// Service being invoked
        service: &'static str,
        /// Minimum coordinate count
        required: usize,
        /// Coordinates present
        actual: usize,
    },

    /// Tile coordinate triple does not address a tile
    #[error("{0}")]
    InvalidTile(String),

    /// Per-coordinate option addressed a coordinate that does not exist
    #[error("{what} index {index} out of bounds for {count} coordinate(s)")]
    InvalidCoordinateIndex {
        /// Option being set
        what: &'static str,
        /// Requested index
        index: usize,
        /// Coordinates present
        count: usize,
    },

    /// Null pointer, unknown enum value, or malformed option
    #[error("{0}")]
    InvalidArgument(String),

    /// A panic was caught at the boundary
    #[error("{0}")]
    Internal(String),

    /// Failure reported by the routing engine, relayed verbatim
    #[error("{message}")]
    Engine {
        /// Engine-supplied code (e.g. `NoRoute`)
        code: String,
        /// Engine-supplied message
        message: String,
    },
}

impl Error {
    /// Stable machine-readable code for programmatic branching
    pub fn code(&self) -> &str {
        match self {
            Error::ConfigInvalid(_) => "CONFIG_INVALID",
            Error::EngineLoadFailed(_) => "ENGINE_LOAD_FAILED",
            Error::CoordinateOutOfRange { .. } => "COORDINATE_OUT_OF_RANGE",
            Error::FormatUnsupported(_) => "FORMAT_UNSUPPORTED",
            Error::WrongServiceType { .. } => "WRONG_SERVICE_TYPE",
            Error::TooFewCoordinates { .. } => "TOO_FEW_COORDINATES",
            Error::InvalidTile(_) => "INVALID_TILE",
            Error::InvalidCoordinateIndex { .. } => "INVALID_COORDINATE_INDEX",
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::Internal(_) => "INTERNAL",
            Error::Engine { code, .. } => code,
        }
    }

    /// Shorthand for [`Error::InvalidArgument`]
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(Error::ConfigInvalid("x".into()).code(), "CONFIG_INVALID");
        assert_eq!(Error::EngineLoadFailed("x".into()).code(), "ENGINE_LOAD_FAILED");
        assert_eq!(
            Error::CoordinateOutOfRange { lon: 200.0, lat: 0.0 }.code(),
            "COORDINATE_OUT_OF_RANGE"
        );
        assert_eq!(Error::FormatUnsupported("x".into()).code(), "FORMAT_UNSUPPORTED");
        assert_eq!(
            Error::WrongServiceType { expected: "route", actual: "table" }.code(),
            "WRONG_SERVICE_TYPE"
        );
        assert_eq!(Error::invalid("x").code(), "INVALID_ARGUMENT");
        assert_eq!(Error::Internal("x".into()).code(), "INTERNAL");
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let err = Error::Engine {
            code: "NoRoute".to_string(),
            message: "Impossible route between points".to_string(),
        };
        assert_eq!(err.code(), "NoRoute");
        assert_eq!(err.to_string(), "Impossible route between points");
    }

    #[test]
    fn test_wrong_service_message() {
        let err = Error::WrongServiceType { expected: "tile", actual: "route" };
        assert_eq!(err.to_string(), "expected tile parameters, got route");
    }
}
