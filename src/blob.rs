//! Owned, immutable byte buffers
//!
//! A [`Blob`] is the unit in which response payloads leave the library:
//! JSON text, FlatBuffers binary, or vector tile bytes. It is always the
//! complete payload of one query and never carries a NUL terminator.

use std::fmt;

/// Owned, length-delimited, immutable byte buffer
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    data: Box<[u8]>,
}

impl Blob {
    /// Take ownership of `bytes` without copying
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            data: bytes.into_boxed_slice(),
        }
    }

    /// Copy `bytes` into a new blob
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            data: Box::from(bytes),
        }
    }

    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read pointer to the payload
    ///
    /// Never null while the blob is alive, including for empty payloads.
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Exact byte length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the blob and return its storage
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_vec()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob::new(bytes)
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob").field("len", &self.len()).finish()
    }
}
