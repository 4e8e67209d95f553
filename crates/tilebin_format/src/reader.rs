//! Map reader - mirrors the writer's traversal and reconstructs concrete
//! types through the factory protocol
//!
//! There is no self-describing schema in the stream. The reader walks the
//! exact record order the writer emitted; a single desynchronization
//! between the two produces garbage, so every change to one side must land
//! in the other in the same release. At each polymorphic slot the reader
//! consumes the tag string, asks the factory for an instance, and populates
//! it field-by-field.

use std::io::Read;

use tilebin_core::{Entity, EntityLayer, Layer, Tile, TileAnimation, TileMap, TileSet};

use crate::codec::{BinaryReader, Compression};
use crate::error::FormatError;
use crate::factory::MapFactory;
use crate::FORMAT_VERSION;

/// Cap on up-front `Vec` pre-allocation from stream-supplied counts. A
/// corrupt count prefix must fail while decoding records, not by exhausting
/// memory before the first record byte is read; the vectors grow past this
/// on demand as real records arrive.
const MAX_PREALLOC: usize = 4096;

/// A successfully decoded map plus the version recorded in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub map: TileMap,
    /// Format version the file was written with.
    pub version: i32,
}

impl Decoded {
    /// Whether the stored version matches [`FORMAT_VERSION`]. A mismatch is
    /// not an error - the read already succeeded on a best-effort basis -
    /// but callers may want to surface it.
    pub fn version_matches(&self) -> bool {
        self.version == FORMAT_VERSION
    }
}

/// Read a complete map from `src`, resolving every polymorphic slot through
/// `factory`.
///
/// `compression` must match the flag the map was written with; it is not
/// recorded in the stream. A version mismatch logs a warning and reading
/// proceeds; everything else in the error taxonomy is fatal.
pub fn read_map<R: Read>(
    src: R,
    compression: Compression,
    factory: &mut dyn MapFactory,
) -> Result<Decoded, FormatError> {
    let mut r = BinaryReader::new(src, compression);

    let version = r.read_i32()?;
    if version != FORMAT_VERSION {
        log::warn!(
            "map was written with format version {version}, expected {FORMAT_VERSION}; \
             reading anyway"
        );
    }

    let tag = r.read_string()?;
    let mut map = factory
        .make_map(&tag)
        .ok_or_else(|| no_instance("map", &tag))?;
    map.tag = tag;
    map.name = r.read_string()?;
    map.tile_size = r.read_i32()?;
    map.width = r.read_i32()?;
    map.height = r.read_i32()?;

    let layer_count = read_count(&mut r, "layer count")?;
    map.layers = Vec::with_capacity(layer_count.min(MAX_PREALLOC));
    for _ in 0..layer_count {
        let layer = read_layer(&mut r, factory)?;
        map.layers.push(layer);
    }

    map.collision = read_layer(&mut r, factory)?;
    map.entities = read_entity_layer(&mut r, factory)?;

    log::debug!(
        "read map '{}' ({} layers, {} entities)",
        map.name,
        map.layers.len(),
        map.entities.entities.len()
    );
    Ok(Decoded { map, version })
}

fn no_instance(kind: &str, tag: &str) -> FormatError {
    FormatError::precondition(format!("factory produced no {kind} for tag '{tag}'"))
}

/// Read a non-negative `i32` count as a usize.
fn read_count<R: Read>(r: &mut BinaryReader<R>, what: &str) -> Result<usize, FormatError> {
    let count = r.read_i32()?;
    usize::try_from(count).map_err(|_| FormatError::format(format!("{what} {count}")))
}

fn read_layer<R: Read>(
    r: &mut BinaryReader<R>,
    factory: &mut dyn MapFactory,
) -> Result<Layer, FormatError> {
    let tag = r.read_string()?;
    let mut layer = factory
        .make_layer(&tag)
        .ok_or_else(|| no_instance("layer", &tag))?;
    layer.tag = tag;
    layer.name = r.read_string()?;

    // Absence of a tile set is data, not an error: the factory is not
    // consulted and the slot stays empty.
    layer.tile_set = if r.read_bool()? {
        Some(read_tile_set(r, factory)?)
    } else {
        None
    };

    let tile_count = r.read_i64()?;
    layer.width = r.read_i32()?;
    layer.height = r.read_i32()?;

    if layer.width < 0 || layer.height < 0 {
        return Err(FormatError::format(format!(
            "layer dimensions {}x{}",
            layer.width, layer.height
        )));
    }
    let expected = i64::from(layer.width) * i64::from(layer.height);
    if tile_count != 0 && tile_count != expected {
        return Err(FormatError::format(format!(
            "tile count {tile_count} for a {}x{} grid",
            layer.width, layer.height
        )));
    }

    layer.tiles = Vec::with_capacity((tile_count as usize).min(MAX_PREALLOC));
    for _ in 0..tile_count {
        let tile = read_tile(r, factory)?;
        layer.tiles.push(tile);
    }
    Ok(layer)
}

fn read_tile_set<R: Read>(
    r: &mut BinaryReader<R>,
    factory: &mut dyn MapFactory,
) -> Result<TileSet, FormatError> {
    let tag = r.read_string()?;
    let resource_name = r.read_string()?;
    let resource_location = r.read_string()?;

    let mut tile_set = factory
        .make_tile_set(&tag, &resource_name, &resource_location)
        .ok_or_else(|| no_instance("tile set", &tag))?;
    tile_set.tag = tag;
    tile_set.resource_name = resource_name;
    tile_set.resource_location = resource_location;
    tile_set.name = r.read_string()?;
    Ok(tile_set)
}

fn read_tile<R: Read>(
    r: &mut BinaryReader<R>,
    factory: &mut dyn MapFactory,
) -> Result<Tile, FormatError> {
    let tag = r.read_string()?;
    let mut tile = factory
        .make_tile(&tag)
        .ok_or_else(|| no_instance("tile", &tag))?;
    tile.tag = tag;

    let variant = r.read_i32()?;
    match variant {
        crate::TILE_PLAIN => {
            tile.id = r.read_i32()?;
            tile.animation = None;
        }
        crate::TILE_ANIMATED => {
            tile.id = r.read_i32()?;
            let frame_times = read_i32_array(r)?;
            let frame_indexes = read_i32_array(r)?;
            tile.animation = Some(TileAnimation::new(frame_times, frame_indexes));
        }
        other => {
            return Err(FormatError::format(format!("tile discriminant {other}")));
        }
    }
    Ok(tile)
}

fn read_i32_array<R: Read>(r: &mut BinaryReader<R>) -> Result<Vec<i32>, FormatError> {
    let len = read_count(r, "array length")?;
    let mut values = Vec::with_capacity(len.min(MAX_PREALLOC));
    for _ in 0..len {
        values.push(r.read_i32()?);
    }
    Ok(values)
}

fn read_entity_layer<R: Read>(
    r: &mut BinaryReader<R>,
    factory: &mut dyn MapFactory,
) -> Result<EntityLayer, FormatError> {
    let tag = r.read_string()?;
    let mut layer = factory
        .make_entity_layer(&tag)
        .ok_or_else(|| no_instance("entity layer", &tag))?;
    layer.tag = tag;
    layer.name = r.read_string()?;

    let count = read_count(r, "entity count")?;
    layer.entities = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let entity = read_entity(r, factory)?;
        layer.entities.push(entity);
    }
    Ok(layer)
}

fn read_entity<R: Read>(
    r: &mut BinaryReader<R>,
    factory: &mut dyn MapFactory,
) -> Result<Entity, FormatError> {
    let tag = r.read_string()?;
    let mut entity = factory
        .make_entity(&tag)
        .ok_or_else(|| no_instance("entity", &tag))?;
    entity.tag = tag;
    entity.name = r.read_string()?;
    entity.id = r.read_i32()?;

    // Same fixed vector order as the writer.
    for pair in [
        &mut entity.grid_position,
        &mut entity.world_position,
        &mut entity.previous_position,
        &mut entity.screen_position,
        &mut entity.collision_offset,
        &mut entity.offscreen_range,
        &mut entity.facing,
        &mut entity.velocity,
        &mut entity.acceleration,
    ] {
        pair[0] = r.read_f32()?;
        pair[1] = r.read_f32()?;
    }

    entity.y_sort_offset = r.read_f32()?;
    entity.active = r.read_bool()?;
    entity.visible = r.read_bool()?;
    entity.alive = r.read_bool()?;

    factory.entity_restored(&mut entity);
    Ok(entity)
}
