//! The complete map

use crate::{tags, EntityLayer, Layer};
use serde::{Deserialize, Serialize};

/// A complete tile map: ordered visual layers, one collision layer, and the
/// entity layer.
///
/// Layer order is significant - it is the render/update order and is
/// preserved by serialization. The collision layer is separate from the
/// visual layers and usually has no tile set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileMap {
    /// Type tag used as the factory key when the map is reconstructed.
    pub tag: String,
    pub name: String,
    /// Edge length of a tile in pixels.
    pub tile_size: i32,
    /// Grid width in tiles.
    pub width: i32,
    /// Grid height in tiles.
    pub height: i32,
    /// Visual layers in render/update order.
    pub layers: Vec<Layer>,
    /// The layer holding gameplay collision ids.
    pub collision: Layer,
    pub entities: EntityLayer,
}

impl TileMap {
    pub fn new(name: String, tile_size: i32, width: i32, height: i32) -> Self {
        Self {
            tag: tags::MAP.to_string(),
            name,
            tile_size,
            width,
            height,
            layers: Vec::new(),
            collision: Layer::new("collision".to_string(), width, height),
            entities: EntityLayer::new("entities".to_string()),
        }
    }

    /// Append a visual layer, keeping render order.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Serialize to pretty JSON for editors and tooling.
    ///
    /// This is an interchange format only; the durable on-disk contract is
    /// the binary format in `tilebin_format`.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a map from its JSON interchange form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(String::new(), 0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tile;

    #[test]
    fn test_new_map() {
        let map = TileMap::new("overworld".to_string(), 16, 40, 30);
        assert_eq!(map.tag, tags::MAP);
        assert_eq!(map.tile_size, 16);
        assert!(map.layers.is_empty());
        assert_eq!(map.collision.width, 40);
        assert_eq!(map.collision.height, 30);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut map = TileMap::new("overworld".to_string(), 16, 4, 4);
        let mut layer = Layer::new("ground".to_string(), 4, 4);
        layer.set_tile(1, 2, Tile::animated(5, vec![100, 100], vec![5, 6]));
        map.add_layer(layer);

        let json = map.to_json_string().unwrap();
        let back = TileMap::from_json_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
