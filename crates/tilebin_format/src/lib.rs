//! Versioned binary map format for tilebin
//!
//! This crate persists a [`tilebin_core::TileMap`] to a compact binary
//! stream and reconstructs it later, possibly in a different process or a
//! different implementation of the format. The two entry points are
//! [`write_map`] and [`read_map`]; reading resolves every polymorphic slot
//! through a caller-supplied [`MapFactory`].
//!
//! # Stream layout
//!
//! Logical layout, identical with and without the DEFLATE filter (the
//! filter wraps the whole stream, version field included, and the flag is
//! never stored - both sides agree on it out of band):
//!
//! ```text
//! i32 version
//! MapRecord        = tag name tile_size width height
//!                    layer_count LayerRecord*layer_count
//!                    LayerRecord(collision) EntityLayerRecord
//! LayerRecord      = tag name
//!                    bool has_tile_set [TileSetRecord if set]
//!                    i64 tile_count  i32 width  i32 height
//!                    TileRecord*tile_count          (row-major)
//! TileSetRecord    = tag resource_name resource_location name
//! TileRecord       = tag  i32 variant(1|2)  i32 id
//!                    [if 2: i32-array frame_times, i32-array frame_indexes]
//! EntityLayerRecord= tag name  i32 count  EntityRecord*count
//! EntityRecord     = tag name  i32 id  9 x (f32, f32)  f32 y_sort
//!                    bool active  bool visible  bool alive
//! ```
//!
//! Integers and floats are big-endian, strings are `i32` byte length plus
//! raw UTF-8 bytes, and an `i32-array` is an `i32` length followed by that
//! many values.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilebin_core::TileMap;
//! use tilebin_format::{read_map, write_map, BasicFactory, Compression};
//!
//! let map = TileMap::new("overworld".to_string(), 16, 50, 50);
//! let mut bytes = Vec::new();
//! write_map(&mut bytes, &map, Compression::Deflate)?;
//!
//! let mut factory = BasicFactory;
//! let decoded = read_map(&bytes[..], Compression::Deflate, &mut factory)?;
//! assert_eq!(decoded.map, map);
//! ```

mod codec;
mod error;
mod factory;
mod reader;
mod writer;

pub use codec::{BinaryReader, BinaryWriter, Compression};
pub use error::FormatError;
pub use factory::{BasicFactory, MapFactory};
pub use reader::{read_map, Decoded};
pub use writer::write_map;

/// Current format version, written at the head of every stream.
///
/// Version 1 signalled an absent tile set by writing the literal string
/// `"null"` in the tag slot; version 2 replaced that sentinel with an
/// explicit presence bool ahead of the record. A reader seeing an
/// unexpected version logs a warning and proceeds best-effort.
pub const FORMAT_VERSION: i32 = 2;

/// Tile record discriminant for the plain variant.
pub const TILE_PLAIN: i32 = 1;

/// Tile record discriminant for the animated variant.
pub const TILE_ANIMATED: i32 = 2;
