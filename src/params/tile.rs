//! Tile service fields

use crate::error::{Error, Result};
use serde::Serialize;

/// Deepest zoom level the engine renders
pub const MAX_TILE_ZOOM: u32 = 22;

/// Slippy-map tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TileParams {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Zoom level
    pub z: u32,
}

impl TileParams {
    /// Check that `(x, y, z)` addresses an existing tile
    pub fn validate(&self) -> Result<()> {
        if self.z > MAX_TILE_ZOOM {
            return Err(Error::InvalidTile(format!(
                "zoom {} exceeds maximum {}",
                self.z, MAX_TILE_ZOOM
            )));
        }
        let extent = 1u32 << self.z;
        if self.x >= extent || self.y >= extent {
            return Err(Error::InvalidTile(format!(
                "tile ({}, {}) outside the {}x{} grid at zoom {}",
                self.x, self.y, extent, extent, self.z
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_tile_valid() {
        assert!(TileParams::default().validate().is_ok());
    }

    #[test]
    fn test_grid_bounds() {
        let tile = TileParams { x: 8800, y: 5373, z: 14 };
        assert!(tile.validate().is_ok());

        let tile = TileParams { x: 1, y: 0, z: 0 };
        assert_eq!(tile.validate().unwrap_err().code(), "INVALID_TILE");

        let tile = TileParams { x: 0, y: 1 << 14, z: 14 };
        assert!(tile.validate().is_err());
    }

    #[test]
    fn test_zoom_limit() {
        let tile = TileParams { x: 0, y: 0, z: MAX_TILE_ZOOM };
        assert!(tile.validate().is_ok());
        let tile = TileParams { x: 0, y: 0, z: MAX_TILE_ZOOM + 1 };
        assert!(tile.validate().is_err());
    }
}
