//! Tile types - plain tiles and frame-animated tiles

use crate::tags;
use serde::{Deserialize, Serialize};

/// A single tile in a layer grid.
///
/// A tile is either plain (just a tile id into its layer's tile set) or
/// animated, in which case it carries per-frame timing and frame indexes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tile {
    /// Type tag used as the factory key when the tile is reconstructed.
    pub tag: String,
    /// Index into the owning layer's tile set.
    pub id: i32,
    /// Animation data; `None` means a plain, static tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<TileAnimation>,
}

impl Tile {
    /// Create a plain tile with the given id.
    pub fn plain(id: i32) -> Self {
        Self {
            tag: tags::TILE.to_string(),
            id,
            animation: None,
        }
    }

    /// Create an animated tile from parallel frame-time and frame-index arrays.
    pub fn animated(id: i32, frame_times: Vec<i32>, frame_indexes: Vec<i32>) -> Self {
        Self {
            tag: tags::TILE.to_string(),
            id,
            animation: Some(TileAnimation::new(frame_times, frame_indexes)),
        }
    }

    /// Whether this tile is the animated variant.
    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::plain(0)
    }
}

/// Frame animation attached to a tile.
///
/// `frame_times` holds the duration of each frame in milliseconds and
/// `frame_indexes` the tile index shown for that frame. The two arrays are
/// parallel. `ping_pong` and `looping` control playback at runtime only:
/// they are not part of the persisted binary record and do not participate
/// in equality, so a written-then-read animation compares equal to its
/// source regardless of playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TileAnimation {
    pub frame_times: Vec<i32>,
    pub frame_indexes: Vec<i32>,
    /// Play forward then backward instead of wrapping. Runtime-only.
    #[serde(default)]
    pub ping_pong: bool,
    /// Restart from the first frame after the last. Runtime-only.
    #[serde(default)]
    pub looping: bool,
}

impl PartialEq for TileAnimation {
    // Playback flags are runtime state; only the persisted frame arrays
    // define animation identity.
    fn eq(&self, other: &Self) -> bool {
        self.frame_times == other.frame_times && self.frame_indexes == other.frame_indexes
    }
}

impl TileAnimation {
    pub fn new(frame_times: Vec<i32>, frame_indexes: Vec<i32>) -> Self {
        Self {
            frame_times,
            frame_indexes,
            ping_pong: false,
            looping: true,
        }
    }

    /// Number of frames in the animation.
    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tile() {
        let tile = Tile::plain(7);
        assert_eq!(tile.id, 7);
        assert_eq!(tile.tag, tags::TILE);
        assert!(!tile.is_animated());
    }

    #[test]
    fn test_animated_tile() {
        let tile = Tile::animated(3, vec![100, 200], vec![3, 4]);
        assert!(tile.is_animated());

        let anim = tile.animation.unwrap();
        assert_eq!(anim.frame_count(), 2);
        assert_eq!(anim.frame_times, vec![100, 200]);
        assert_eq!(anim.frame_indexes, vec![3, 4]);
        assert!(anim.looping);
        assert!(!anim.ping_pong);
    }

    #[test]
    fn test_animation_equality_ignores_playback_flags() {
        let a = TileAnimation::new(vec![100, 200], vec![0, 1]);
        let mut b = TileAnimation::new(vec![100, 200], vec![0, 1]);
        b.looping = false;
        b.ping_pong = true;
        assert_eq!(a, b);

        let c = TileAnimation::new(vec![100, 300], vec![0, 1]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_tile_is_plain() {
        let tile = Tile::default();
        assert_eq!(tile.id, 0);
        assert!(tile.animation.is_none());
    }
}
