//! Core data structures for tilebin
//!
//! This crate provides the fundamental types for representing tile-based maps:
//! - `TileMap` - A complete map with layers, a collision layer, and entities
//! - `Layer` - A single tile layer backed by a flat row-major grid
//! - `TileSet` - Named reference to a shared tile atlas resource
//! - `Tile` - A plain or animated tile
//! - `EntityLayer` / `Entity` - Dynamic objects placed in the world
//!
//! The binary persistence of these types lives in `tilebin_format`; this
//! crate only knows about the in-memory shape and JSON interchange for
//! editors and tooling.

mod entity;
mod layer;
mod map;
mod tile;
mod tileset;

pub mod tags;

pub use entity::{Entity, EntityLayer};
pub use layer::Layer;
pub use map::TileMap;
pub use tile::{Tile, TileAnimation};
pub use tileset::TileSet;
