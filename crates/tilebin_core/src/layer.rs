//! Tile layer backed by a flat row-major grid

use crate::{tags, Tile, TileSet};
use serde::{Deserialize, Serialize};

/// A single layer of tiles.
///
/// The grid is a flat buffer indexed `y * width + x`. A layer may have an
/// empty grid (`tiles.len() == 0`) while still recording its dimensions -
/// the serialization layer preserves that distinction. A populated grid
/// always holds exactly `width * height` tiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    /// Type tag used as the factory key when the layer is reconstructed.
    pub tag: String,
    pub name: String,
    /// Visual tile set, if any. A pure collision layer has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_set: Option<TileSet>,
    pub width: i32,
    pub height: i32,
    /// Row-major tile grid; empty, or exactly `width * height` entries.
    pub tiles: Vec<Tile>,
}

impl Layer {
    /// Create a layer with a grid of default (plain, id 0) tiles.
    pub fn new(name: String, width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            tag: tags::LAYER.to_string(),
            name,
            tile_set: None,
            width,
            height,
            tiles: vec![Tile::default(); size],
        }
    }

    /// Create a layer that records dimensions but holds no tiles.
    pub fn with_empty_grid(name: String, width: i32, height: i32) -> Self {
        Self {
            tag: tags::LAYER.to_string(),
            name,
            tile_set: None,
            width,
            height,
            tiles: Vec::new(),
        }
    }

    /// Attach a tile set.
    pub fn with_tile_set(mut self, tile_set: TileSet) -> Self {
        self.tile_set = Some(tile_set);
        self
    }

    /// Whether the recorded dimensions are non-negative and the grid length
    /// matches them (or the grid is empty).
    pub fn grid_is_consistent(&self) -> bool {
        self.width >= 0
            && self.height >= 0
            && (self.tiles.is_empty()
                || self.tiles.len() == (self.width as usize) * (self.height as usize))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if idx < self.tiles.len() {
            Some(idx)
        } else {
            None
        }
    }

    /// Get the tile at `(x, y)`, if in bounds and the grid is populated.
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Get a mutable tile at `(x, y)`.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(|i| &mut self.tiles[i])
    }

    /// Replace the tile at `(x, y)`. Returns false if out of bounds.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::with_empty_grid(String::new(), 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_fills_grid() {
        let layer = Layer::new("Ground".to_string(), 10, 8);
        assert_eq!(layer.name, "Ground");
        assert_eq!(layer.tiles.len(), 80);
        assert!(layer.grid_is_consistent());
        assert!(layer.tiles.iter().all(|t| !t.is_animated()));
    }

    #[test]
    fn test_empty_grid_keeps_dimensions() {
        let layer = Layer::with_empty_grid("Collision".to_string(), 50, 50);
        assert_eq!(layer.width, 50);
        assert_eq!(layer.height, 50);
        assert!(layer.tiles.is_empty());
        assert!(layer.grid_is_consistent());
    }

    #[test]
    fn test_tile_accessors() {
        let mut layer = Layer::new("Ground".to_string(), 4, 4);
        assert!(layer.set_tile(2, 3, Tile::plain(9)));
        assert_eq!(layer.tile(2, 3).map(|t| t.id), Some(9));

        assert!(layer.tile(4, 0).is_none());
        assert!(layer.tile(-1, 0).is_none());
        assert!(!layer.set_tile(0, 4, Tile::plain(1)));
    }

    #[test]
    fn test_inconsistent_grid_detected() {
        let mut layer = Layer::new("Ground".to_string(), 2, 2);
        layer.tiles.pop();
        assert!(!layer.grid_is_consistent());
    }

    #[test]
    fn test_negative_dimensions_inconsistent() {
        let layer = Layer::with_empty_grid("Broken".to_string(), -9, 7);
        assert!(!layer.grid_is_consistent());
        let layer = Layer::with_empty_grid("Broken".to_string(), 9, -7);
        assert!(!layer.grid_is_consistent());
    }
}
