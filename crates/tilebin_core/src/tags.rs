//! Canonical type tags for the reconstruction protocol
//!
//! A tag is the string recorded ahead of every polymorphic record in the
//! binary format. Readers hand the tag to a factory, which resolves it to a
//! concrete type. Tags are an explicit, stable vocabulary - they are never
//! derived from Rust type names, so renaming a type does not break files on
//! disk, and implementations in other languages only need to agree on these
//! strings.
//!
//! Games extend the vocabulary with their own tags (e.g. `"player"`,
//! `"chest"`) by constructing model values with a custom `tag` field and
//! resolving them in their own factory.

/// Tag for the map record itself.
pub const MAP: &str = "map";

/// Tag for a tile layer.
pub const LAYER: &str = "layer";

/// Tag for a tile set.
pub const TILE_SET: &str = "tileset";

/// Tag for a single tile.
pub const TILE: &str = "tile";

/// Tag for the entity layer.
pub const ENTITY_LAYER: &str = "entity-layer";

/// Tag for a generic entity.
pub const ENTITY: &str = "entity";
