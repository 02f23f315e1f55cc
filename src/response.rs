//! Query responses
//!
//! A [`Response`] wraps the payload of one successful invocation together
//! with the service and format it was produced for. Accessors hand out
//! copies; the only borrowed view is [`Response::primary`].

use crate::blob::Blob;
use crate::error::{Error, Result};
use crate::params::{OutputFormat, ServiceKind};

/// Result of one service invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    service: ServiceKind,
    format: OutputFormat,
    blobs: Vec<Blob>,
}

impl Response {
    /// Wrap a single payload
    pub fn new(service: ServiceKind, format: OutputFormat, payload: Vec<u8>) -> Self {
        Response {
            service,
            format,
            blobs: vec![Blob::new(payload)],
        }
    }

    /// Service that produced this response
    pub fn service(&self) -> ServiceKind {
        self.service
    }

    /// Format of every payload in this response
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fail unless this response came from `expected`
    pub fn expect_service(&self, expected: ServiceKind) -> Result<&Self> {
        if self.service != expected {
            return Err(Error::WrongServiceType {
                expected: expected.name(),
                actual: self.service.name(),
            });
        }
        Ok(self)
    }

    /// Borrow the primary payload
    pub fn primary(&self) -> &Blob {
        // A response is only ever built around at least one payload
        &self.blobs[0]
    }

    /// Number of payloads
    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Copy of the primary payload
    pub fn blob(&self) -> Blob {
        self.primary().clone()
    }

    /// Copy of the payload at `index`
    pub fn blob_at(&self, index: usize) -> Result<Blob> {
        self.blobs.get(index).cloned().ok_or_else(|| {
            Error::invalid(format!(
                "blob index {} out of range for {} blob(s)",
                index,
                self.blobs.len()
            ))
        })
    }

    /// Copy of the primary payload, only for JSON responses
    pub fn json(&self) -> Result<Blob> {
        if self.format != OutputFormat::Json {
            return Err(Error::FormatUnsupported(format!(
                "{} response is {:?}, not JSON",
                self.service, self.format
            )));
        }
        Ok(self.blob())
    }

    /// Primary payload decoded as a JSON value
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        let blob = self.json()?;
        serde_json::from_slice(blob.as_bytes())
            .map_err(|e| Error::FormatUnsupported(format!("payload is not valid JSON: {}", e)))
    }

    /// Consume the response and return its payloads
    pub fn into_blobs(self) -> Vec<Blob> {
        self.blobs
    }
}
