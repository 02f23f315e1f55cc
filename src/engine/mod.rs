//! Engine seam
//!
//! The routing engine is an external collaborator. This module defines the
//! two traits the bridge talks to: an [`EngineLoader`] turns a [`Config`]
//! into a loaded [`Engine`], and the engine answers queries with the
//! complete payload bytes of one response.
//!
//! Rust hosts implement the traits directly. C hosts fill in a
//! [`native::osrmc_engine_vtable_t`] instead.

pub mod native;

use crate::config::Config;
use crate::error::Error;
use crate::params::{Params, ServiceKind};
use serde::Deserialize;
use std::fmt;

/// Failure reported by the engine: its own code and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    /// Engine-supplied code, e.g. `NoRoute`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Code used when the engine failed without a readable error document
pub const UNKNOWN_FAILURE_CODE: &str = "Unknown";

const NO_DETAILS: &str = "engine reported an error without details";

#[derive(Deserialize)]
struct FailureDocument {
    code: Option<String>,
    message: Option<String>,
}

impl EngineFailure {
    /// New failure
    ///
    /// An empty code becomes [`UNKNOWN_FAILURE_CODE`] and an empty message a
    /// generic description, so every reported error carries both.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        EngineFailure {
            code: code.into(),
            message: message.into(),
        }
        .normalized()
    }

    pub(crate) fn normalized(mut self) -> Self {
        if self.code.trim().is_empty() {
            self.code = UNKNOWN_FAILURE_CODE.to_string();
        }
        if self.message.is_empty() {
            self.message = NO_DETAILS.to_string();
        }
        self
    }

    /// Parse a `{"code": ..., "message": ...}` error document
    ///
    /// A missing code or a document that is not JSON yields
    /// [`UNKNOWN_FAILURE_CODE`]; the raw text becomes the message.
    pub fn from_document(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<FailureDocument>(bytes) {
            Ok(FailureDocument {
                code: Some(code),
                message,
            }) if !code.is_empty() => EngineFailure {
                code,
                message: message.unwrap_or_default(),
            },
            Ok(FailureDocument { message: Some(message), .. }) => {
                EngineFailure::new(UNKNOWN_FAILURE_CODE, message)
            }
            _ if bytes.is_empty() => EngineFailure::new(UNKNOWN_FAILURE_CODE, NO_DETAILS),
            _ => EngineFailure::new(UNKNOWN_FAILURE_CODE, String::from_utf8_lossy(bytes)),
        }
    }
}

impl fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<EngineFailure> for Error {
    fn from(failure: EngineFailure) -> Self {
        // Struct literals bypass `new`
        let failure = failure.normalized();
        Error::Engine {
            code: failure.code,
            message: failure.message,
        }
    }
}

/// A loaded routing engine
///
/// Implementations must tolerate concurrent `query` calls.
pub trait Engine: Send + Sync {
    /// Answer one query
    ///
    /// `params` has already passed structural validation for `service`. The
    /// returned bytes are the complete payload in `params.format()`.
    fn query(&self, service: ServiceKind, params: &Params) -> Result<Vec<u8>, EngineFailure>;
}

/// Loads an [`Engine`] for a configuration
pub trait EngineLoader: Send + Sync + fmt::Debug {
    /// Load the dataset named by `config`
    fn load(&self, config: &Config) -> Result<Box<dyn Engine>, EngineFailure>;
}
