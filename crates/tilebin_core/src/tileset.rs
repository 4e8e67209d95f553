//! Tile set - a named reference to a shared atlas resource

use crate::tags;
use serde::{Deserialize, Serialize};

/// Reference to the image atlas a layer draws its tiles from.
///
/// A tile set never carries pixel data. `resource_name` identifies the
/// shared image resource by key, and `resource_location` is a path or URI
/// hint that a factory can use to re-bind the asset when a map is loaded in
/// a different process. Both strings are opaque to the serialization layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileSet {
    /// Type tag used as the factory key when the tile set is reconstructed.
    pub tag: String,
    pub name: String,
    /// Key of the shared image resource.
    pub resource_name: String,
    /// Path or URI hint for re-binding the image resource.
    pub resource_location: String,
}

impl TileSet {
    pub fn new(name: String, resource_name: String, resource_location: String) -> Self {
        Self {
            tag: tags::TILE_SET.to_string(),
            name,
            resource_name,
            resource_location,
        }
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new(String::new(), String::new(), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tileset() {
        let ts = TileSet::new(
            "terrain".to_string(),
            "terrain-atlas".to_string(),
            "textures/terrain.png".to_string(),
        );
        assert_eq!(ts.tag, tags::TILE_SET);
        assert_eq!(ts.name, "terrain");
        assert_eq!(ts.resource_name, "terrain-atlas");
        assert_eq!(ts.resource_location, "textures/terrain.png");
    }
}
