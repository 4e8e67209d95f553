//! Factory protocol - the extension point that resolves type tags to
//! concrete instances during reading
//!
//! The binary format never embeds language-level type metadata. Every
//! polymorphic record starts with a tag string, and the reader asks the
//! factory supplied by the caller to turn that tag into a fresh,
//! default-initialized instance which is then populated from the stream.
//! Cross-implementation portability rests entirely on tag agreement (see
//! [`tilebin_core::tags`]).
//!
//! Anything a factory needs to bind external state - an asset cache for
//! tile set images, an entity registry - is an explicit dependency of the
//! factory value itself, passed in by whoever constructs it. There is no
//! ambient global registry.

use tilebin_core::{tags, Entity, EntityLayer, Layer, Tile, TileMap, TileSet};

/// Supplies concrete instances for each polymorphic slot in the format.
///
/// Returning `None` from any `make_*` method aborts the read with a
/// precondition violation - a factory that does not recognize a tag must
/// not silently substitute a different type.
pub trait MapFactory {
    fn make_map(&mut self, tag: &str) -> Option<TileMap>;

    fn make_layer(&mut self, tag: &str) -> Option<Layer>;

    /// Produce a tile set. `resource_name` and `resource_location` are the
    /// hint strings recorded at write time, provided so the factory can
    /// re-bind the backing image resource; the reader fills in the same
    /// strings on the returned value afterwards either way.
    fn make_tile_set(
        &mut self,
        tag: &str,
        resource_name: &str,
        resource_location: &str,
    ) -> Option<TileSet>;

    fn make_tile(&mut self, tag: &str) -> Option<Tile>;

    fn make_entity_layer(&mut self, tag: &str) -> Option<EntityLayer>;

    fn make_entity(&mut self, tag: &str) -> Option<Entity>;

    /// Called after an entity's generic fields have been restored from the
    /// stream. Factories that attach runtime state (sprites, animators,
    /// collision boxes) rebuild it here. Default: nothing.
    fn entity_restored(&mut self, _entity: &mut Entity) {}
}

/// Factory for the canonical tag vocabulary.
///
/// Resolves exactly the tags in [`tilebin_core::tags`] to default model
/// values and rejects everything else. This is the identity factory for
/// round-tripping maps that use no game-specific types; games layer their
/// own factory on top (or wrap this one) to handle custom tags.
#[derive(Debug, Default)]
pub struct BasicFactory;

impl MapFactory for BasicFactory {
    fn make_map(&mut self, tag: &str) -> Option<TileMap> {
        (tag == tags::MAP).then(TileMap::default)
    }

    fn make_layer(&mut self, tag: &str) -> Option<Layer> {
        (tag == tags::LAYER).then(Layer::default)
    }

    fn make_tile_set(
        &mut self,
        tag: &str,
        _resource_name: &str,
        _resource_location: &str,
    ) -> Option<TileSet> {
        (tag == tags::TILE_SET).then(TileSet::default)
    }

    fn make_tile(&mut self, tag: &str) -> Option<Tile> {
        (tag == tags::TILE).then(Tile::default)
    }

    fn make_entity_layer(&mut self, tag: &str) -> Option<EntityLayer> {
        (tag == tags::ENTITY_LAYER).then(EntityLayer::default)
    }

    fn make_entity(&mut self, tag: &str) -> Option<Entity> {
        (tag == tags::ENTITY).then(Entity::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_factory_resolves_canonical_tags() {
        let mut factory = BasicFactory;
        assert!(factory.make_map(tags::MAP).is_some());
        assert!(factory.make_layer(tags::LAYER).is_some());
        assert!(factory.make_tile_set(tags::TILE_SET, "atlas", "a.png").is_some());
        assert!(factory.make_tile(tags::TILE).is_some());
        assert!(factory.make_entity_layer(tags::ENTITY_LAYER).is_some());
        assert!(factory.make_entity(tags::ENTITY).is_some());
    }

    #[test]
    fn test_basic_factory_rejects_unknown_tags() {
        let mut factory = BasicFactory;
        assert!(factory.make_map("boss-arena").is_none());
        assert!(factory.make_entity("player").is_none());
        assert!(factory.make_tile_set("atlas", "a", "b").is_none());
    }
}
