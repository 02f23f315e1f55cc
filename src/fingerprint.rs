//! Dataset fingerprint
//!
//! Every prepared dataset carries an 8-byte fingerprint next to its base
//! path (`<base>.fingerprint`) identifying the format and the engine version
//! that produced it:
//!
//! ```text
//! ┌─────────┬───────┬───────┬───────┬──────────┐
//! │ "OSRN"  │ major │ minor │ patch │ checksum │
//! │ 4 bytes │  u8   │  u8   │  u8   │    u8    │
//! └─────────┴───────┴───────┴───────┴──────────┘
//! ```
//!
//! The checksum is the XOR of the seven preceding bytes. Only the major
//! version has to match [`DATASET_MAJOR`]; minor and patch releases keep the
//! on-disk layout.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Magic bytes at the start of every fingerprint
pub const MAGIC: [u8; 4] = *b"OSRN";

/// Dataset major version this build can load
pub const DATASET_MAJOR: u8 = 6;

/// File name suffix appended to the dataset base path
pub const FINGERPRINT_SUFFIX: &str = ".fingerprint";

/// On-disk fingerprint (8 bytes, no padding)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Fingerprint {
    /// Magic bytes: "OSRN"
    pub magic: [u8; 4],
    /// Engine major version that produced the dataset
    pub major: u8,
    /// Engine minor version
    pub minor: u8,
    /// Engine patch version
    pub patch: u8,
    /// XOR of the preceding bytes
    pub checksum: u8,
}

impl Fingerprint {
    /// Build a fingerprint for the given version with a valid checksum
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        let mut fp = Fingerprint {
            magic: MAGIC,
            major,
            minor,
            patch,
            checksum: 0,
        };
        fp.checksum = fp.compute_checksum();
        fp
    }

    /// Parse a fingerprint from raw bytes without validating it
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (fp, _rest) = Fingerprint::read_from_prefix(bytes).map_err(|_| {
            Error::ConfigInvalid(format!(
                "fingerprint too small: {} bytes (need {})",
                bytes.len(),
                std::mem::size_of::<Fingerprint>()
            ))
        })?;
        Ok(fp)
    }

    fn compute_checksum(&self) -> u8 {
        self.as_bytes()[..7].iter().fold(0u8, |acc, b| acc ^ b)
    }

    /// Check magic, checksum and version compatibility
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            return Err(Error::ConfigInvalid(format!(
                "invalid fingerprint magic {:?}, expected {:?}",
                self.magic, MAGIC
            )));
        }
        if self.checksum != self.compute_checksum() {
            return Err(Error::ConfigInvalid(
                "fingerprint checksum mismatch, dataset is corrupt".to_string(),
            ));
        }
        if !self.is_compatible() {
            return Err(Error::ConfigInvalid(format!(
                "dataset prepared with version {} but this build supports {}.x",
                self, DATASET_MAJOR
            )));
        }
        Ok(())
    }

    /// Whether the dataset major version matches this build
    pub fn is_compatible(&self) -> bool {
        self.major == DATASET_MAJOR
    }

    /// Read and validate the fingerprint belonging to a dataset base path
    pub fn read_for(base_path: &Path) -> Result<Self> {
        let path = fingerprint_path(base_path);
        let bytes = fs::read(&path).map_err(|e| {
            Error::ConfigInvalid(format!(
                "cannot read dataset fingerprint {}: {}",
                path.display(),
                e
            ))
        })?;
        let fp = Fingerprint::parse(&bytes)?;
        fp.validate()?;
        Ok(fp)
    }

    /// Write this fingerprint next to a dataset base path
    pub fn write_for(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let path = fingerprint_path(base_path);
        fs::write(&path, self.as_bytes())?;
        Ok(path)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Location of the fingerprint for a dataset base path
pub fn fingerprint_path(base_path: &Path) -> PathBuf {
    let mut name = base_path.as_os_str().to_os_string();
    name.push(FINGERPRINT_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_is_eight_bytes() {
        assert_eq!(std::mem::size_of::<Fingerprint>(), 8);
    }

    #[test]
    fn test_new_fingerprint_validates() {
        let fp = Fingerprint::new(DATASET_MAJOR, 2, 1);
        assert!(fp.validate().is_ok());
        assert_eq!(fp.to_string(), "6.2.1");
    }

    #[test]
    fn test_parse_roundtrip_bytes() {
        let fp = Fingerprint::new(DATASET_MAJOR, 0, 0);
        let parsed = Fingerprint::parse(fp.as_bytes()).unwrap();
        assert_eq!(parsed, fp);
    }

    #[test]
    fn test_short_input_rejected() {
        let err = Fingerprint::parse(b"OSRN").unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut fp = Fingerprint::new(DATASET_MAJOR, 0, 0);
        fp.magic = *b"MMDB";
        let err = fp.validate().unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut fp = Fingerprint::new(DATASET_MAJOR, 0, 0);
        fp.checksum ^= 0xff;
        let err = fp.validate().unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_major_mismatch_rejected() {
        let fp = Fingerprint::new(5, 27, 1);
        let err = fp.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
        assert!(err.to_string().contains("5.27.1"));
    }

    #[test]
    fn test_read_for_base_path() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("berlin.osrm");
        Fingerprint::new(DATASET_MAJOR, 1, 0).write_for(&base).unwrap();

        assert_eq!(
            fingerprint_path(&base),
            dir.path().join("berlin.osrm.fingerprint")
        );
        let fp = Fingerprint::read_for(&base).unwrap();
        assert_eq!(fp.minor, 1);
    }

    #[test]
    fn test_read_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Fingerprint::read_for(&dir.path().join("missing.osrm")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
        assert!(err.to_string().contains("missing.osrm.fingerprint"));
    }
}
