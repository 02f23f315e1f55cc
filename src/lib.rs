//! osrmc - Stable C Interface to a Native Routing Engine
//!
//! osrmc bridges a pre-built routing engine to C callers (and Rust callers)
//! through a small set of owned objects: a configuration naming a prepared
//! dataset, a loaded engine instance, per-query parameter objects for six
//! services, and responses that hand back the engine's payload as owned
//! byte buffers.
//!
//! # Quick Start
//!
//! ```rust
//! use osrmc::{Config, Engine, EngineFailure, EngineLoader, Osrm, Params, ServiceKind};
//! use std::sync::Arc;
//!
//! // A host links the real engine through an EngineLoader. This one
//! // answers every query with an empty route list.
//! #[derive(Debug)]
//! struct Stub;
//! impl EngineLoader for Stub {
//!     fn load(&self, _: &Config) -> Result<Box<dyn Engine>, EngineFailure> {
//!         Ok(Box::new(Stub))
//!     }
//! }
//! impl Engine for Stub {
//!     fn query(&self, _: ServiceKind, _: &Params) -> Result<Vec<u8>, EngineFailure> {
//!         Ok(br#"{"code":"Ok","routes":[]}"#.to_vec())
//!     }
//! }
//!
//! let mut config = Config::shared_memory();
//! config.set_loader(Arc::new(Stub));
//! let osrm = Osrm::new(&config)?;
//!
//! let mut params = Params::new(ServiceKind::Route);
//! params.add_coordinate(13.388860, 52.517037)?;
//! params.add_coordinate(13.397634, 52.529407)?;
//!
//! let response = osrm.route(&params)?;
//! assert!(response.to_json_value()?["routes"].is_array());
//! # Ok::<(), osrmc::Error>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   load    ┌──────────────┐
//! │  Config  │ ────────▶ │ Osrm (Engine)│ ◀── Params (one per query)
//! └──────────┘           └──────┬───────┘
//!  fingerprint                  │ validate, then query
//!  checked here                 ▼
//!                        ┌──────────────┐  copy   ┌──────┐
//!                        │   Response   │ ──────▶ │ Blob │
//!                        └──────────────┘         └──────┘
//! ```
//!
//! Every failure is an [`Error`] with a stable [`Error::code`]. The C surface
//! in [`c_api`] reports the same codes through an `osrmc_error_t**`
//! out-parameter.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Owned payload buffers
pub mod blob;
/// Engine configuration
pub mod config;
/// Engine seam and native adapter
pub mod engine;
/// Error types for osrmc operations
pub mod error;
pub mod fingerprint;
pub mod logging;
/// Engine instance and service invocation
pub mod osrm;
pub mod params;
pub mod response;

// Public C API
pub mod c_api;

// Re-exports for Rust consumers

pub use crate::blob::Blob;
pub use crate::config::{Algorithm, Config, FeatureDataset};
pub use crate::engine::{Engine, EngineFailure, EngineLoader};
pub use crate::error::{Error, Result};
pub use crate::fingerprint::Fingerprint;
pub use crate::osrm::Osrm;
pub use crate::params::{OutputFormat, Params, ServiceKind};
pub use crate::response::Response;

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version
pub const VERSION_MAJOR: u32 = 6;

/// Library minor version
pub const VERSION_MINOR: u32 = 0;

/// Library patch version
pub const VERSION_PATCH: u32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "6.0.0");
        assert_eq!(VERSION_MAJOR, u32::from(fingerprint::DATASET_MAJOR));
        assert_eq!(VERSION_MINOR, 0);
    }
}
