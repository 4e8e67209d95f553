//! Map writer - walks the data model depth-first and emits the versioned
//! binary record stream

use std::io::Write;

use tilebin_core::{Entity, EntityLayer, Layer, Tile, TileMap, TileSet};

use crate::codec::{BinaryWriter, Compression};
use crate::error::FormatError;
use crate::FORMAT_VERSION;

/// Write a complete map to `dest`.
///
/// The traversal order is the format: map header, visual layers in order,
/// the collision layer, then the entity layer. The reader walks the exact
/// same order - see the module docs on [`crate::reader`].
///
/// Preconditions are checked before the first byte is written; a violation
/// leaves `dest` untouched. Any failure after that leaves the destination
/// in an unspecified state (the format has no checksums or resumable
/// offsets), so callers wanting atomicity should write to a temporary
/// location and rename on success.
pub fn write_map<W: Write>(
    dest: W,
    map: &TileMap,
    compression: Compression,
) -> Result<(), FormatError> {
    check_preconditions(map)?;

    log::debug!(
        "writing map '{}' ({} layers, {}x{} tiles) {}",
        map.name,
        map.layers.len(),
        map.width,
        map.height,
        match compression {
            Compression::None => "uncompressed",
            Compression::Deflate => "deflate",
        }
    );

    let mut w = BinaryWriter::new(dest, compression);
    w.write_i32(FORMAT_VERSION)?;

    w.write_string(&map.tag)?;
    w.write_string(&map.name)?;
    w.write_i32(map.tile_size)?;
    w.write_i32(map.width)?;
    w.write_i32(map.height)?;

    let layer_count = i32::try_from(map.layers.len())
        .map_err(|_| FormatError::precondition(format!("{} layers", map.layers.len())))?;
    w.write_i32(layer_count)?;
    for layer in &map.layers {
        write_layer(&mut w, layer)?;
    }

    write_layer(&mut w, &map.collision)?;
    write_entity_layer(&mut w, &map.entities)?;

    w.finish()?;
    Ok(())
}

/// Grid-consistency checks for every layer, run before anything is emitted.
fn check_preconditions(map: &TileMap) -> Result<(), FormatError> {
    for layer in map.layers.iter().chain(std::iter::once(&map.collision)) {
        if !layer.grid_is_consistent() {
            return Err(FormatError::precondition(format!(
                "layer '{}' holds {} tiles for a {}x{} grid",
                layer.name,
                layer.tiles.len(),
                layer.width,
                layer.height
            )));
        }
    }
    Ok(())
}

fn write_layer<W: Write>(w: &mut BinaryWriter<W>, layer: &Layer) -> Result<(), FormatError> {
    w.write_string(&layer.tag)?;
    w.write_string(&layer.name)?;

    // Presence flag ahead of the tile set record; an absent tile set writes
    // nothing further.
    match &layer.tile_set {
        Some(tile_set) => {
            w.write_bool(true)?;
            write_tile_set(w, tile_set)?;
        }
        None => w.write_bool(false)?,
    }

    w.write_i64(layer.tiles.len() as i64)?;
    w.write_i32(layer.width)?;
    w.write_i32(layer.height)?;
    for tile in &layer.tiles {
        write_tile(w, tile)?;
    }
    Ok(())
}

fn write_tile_set<W: Write>(w: &mut BinaryWriter<W>, tile_set: &TileSet) -> Result<(), FormatError> {
    w.write_string(&tile_set.tag)?;
    w.write_string(&tile_set.resource_name)?;
    w.write_string(&tile_set.resource_location)?;
    w.write_string(&tile_set.name)?;
    Ok(())
}

fn write_tile<W: Write>(w: &mut BinaryWriter<W>, tile: &Tile) -> Result<(), FormatError> {
    w.write_string(&tile.tag)?;
    match &tile.animation {
        None => {
            w.write_i32(crate::TILE_PLAIN)?;
            w.write_i32(tile.id)?;
        }
        Some(anim) => {
            w.write_i32(crate::TILE_ANIMATED)?;
            w.write_i32(tile.id)?;
            write_i32_array(w, &anim.frame_times)?;
            write_i32_array(w, &anim.frame_indexes)?;
        }
    }
    Ok(())
}

fn write_i32_array<W: Write>(w: &mut BinaryWriter<W>, values: &[i32]) -> Result<(), FormatError> {
    let len = i32::try_from(values.len())
        .map_err(|_| FormatError::precondition(format!("array of {} entries", values.len())))?;
    w.write_i32(len)?;
    for v in values {
        w.write_i32(*v)?;
    }
    Ok(())
}

fn write_entity_layer<W: Write>(
    w: &mut BinaryWriter<W>,
    layer: &EntityLayer,
) -> Result<(), FormatError> {
    w.write_string(&layer.tag)?;
    w.write_string(&layer.name)?;

    let count = i32::try_from(layer.entities.len())
        .map_err(|_| FormatError::precondition(format!("{} entities", layer.entities.len())))?;
    w.write_i32(count)?;
    for entity in &layer.entities {
        write_entity(w, entity)?;
    }
    Ok(())
}

fn write_entity<W: Write>(w: &mut BinaryWriter<W>, entity: &Entity) -> Result<(), FormatError> {
    w.write_string(&entity.tag)?;
    w.write_string(&entity.name)?;
    w.write_i32(entity.id)?;

    // Vector order is fixed by the format; the reader consumes the same
    // sequence positionally.
    for pair in [
        entity.grid_position,
        entity.world_position,
        entity.previous_position,
        entity.screen_position,
        entity.collision_offset,
        entity.offscreen_range,
        entity.facing,
        entity.velocity,
        entity.acceleration,
    ] {
        w.write_f32(pair[0])?;
        w.write_f32(pair[1])?;
    }

    w.write_f32(entity.y_sort_offset)?;
    w.write_bool(entity.active)?;
    w.write_bool(entity.visible)?;
    w.write_bool(entity.alive)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inconsistent_grid_writes_nothing() {
        let mut map = TileMap::new("broken".to_string(), 16, 2, 2);
        let mut layer = Layer::new("ground".to_string(), 2, 2);
        layer.tiles.pop();
        map.add_layer(layer);

        let mut dest = Vec::new();
        let result = write_map(&mut dest, &map, Compression::None);
        assert!(matches!(result, Err(FormatError::Precondition(_))));
        assert!(dest.is_empty());
    }

    #[test]
    fn test_negative_dimensions_write_nothing() {
        let mut map = TileMap::new("broken".to_string(), 16, 2, 2);
        map.add_layer(Layer::with_empty_grid("ground".to_string(), -4, 4));

        let mut dest = Vec::new();
        let result = write_map(&mut dest, &map, Compression::None);
        assert!(matches!(result, Err(FormatError::Precondition(_))));
        assert!(dest.is_empty());
    }

    #[test]
    fn test_stream_starts_with_version() {
        let map = TileMap::new("v".to_string(), 16, 1, 1);
        let mut dest = Vec::new();
        write_map(&mut dest, &map, Compression::None).unwrap();
        assert_eq!(&dest[..4], &FORMAT_VERSION.to_be_bytes());
    }
}
